//! An incremental, resumable HTTP/1.x request-line and header parser.
//!
//! The entry point is [`read_request`], which drives a [`ByteSource`]
//! (most commonly a [`ReaderSource`] wrapping a `TcpStream` or any
//! other blocking [`std::io::Read`]) through the wire grammar and
//! produces a [`Request`]: method, request-target, protocol version,
//! a case-normalised header map, and the derived `Host`,
//! `Content-Length` and connection-`close` fields.
//!
//! ```no_run
//! use std::net::TcpListener;
//! use reqline::{read_request, Config, ReaderSource};
//!
//! let listener = TcpListener::bind("127.0.0.1:0").unwrap();
//! let (stream, _) = listener.accept().unwrap();
//! let mut source = ReaderSource::new(stream);
//! let request = read_request(&mut source, &Config::default()).unwrap();
//! println!("{} {}", request.method, request.host);
//! ```
//!
//! The parser tolerates a request arriving in arbitrarily small
//! chunks (it is resumed across peeks, never re-scanning bytes it has
//! already classified) and bounds the bytes it will buffer before
//! giving up with [`Error::HeaderTooLarge`].

mod builder;
mod classify;
mod config;
mod driver;
mod error;
mod headers;
mod parser;
mod request;
mod source;
mod target;

pub use config::{Config, MIN_HEADER_BYTES};
pub use driver::read_request;
pub use error::Error;
pub use headers::Headers;
pub use request::Request;
pub use source::{ByteSource, ReaderSource};
pub use target::RequestTarget;
