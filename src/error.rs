//! The error taxonomy for a failed parse.
//!
//! Every variant is fatal: there is no recovery path, and a server
//! embedding this crate should respond 400 (or drop the connection, for
//! `Io`/`Internal`) and move on. Kept as a flat, allocation-free enum
//! rather than a boxed `dyn Error` chain, to match the "near-zero heap
//! traffic" hot-path goal — constructing or propagating an `Error` here
//! never touches the allocator.

use std::fmt;
use std::io;

/// Why a request failed to parse.
#[derive(Debug)]
pub enum Error {
    /// The request-line had no method, or the method was not a valid
    /// `token`.
    MissingMethod,
    /// The request-target was empty.
    MissingRequestUri,
    /// A header line had an empty `field-name`.
    MissingHeaderName,
    /// A header line had no value after `OWS`.
    MissingHeaderValue,
    /// A single `SP` was required between request-line tokens and
    /// wasn't found.
    ExpectedSpace,
    /// A header `field-name` was not terminated by `:`.
    ExpectedColon,
    /// `CR` was required and a different byte was found.
    ExpectedCr,
    /// `LF` was required (after `CR`) and a different byte was found.
    ExpectedLf,
    /// The `protocol` production did not match `"HTTP/" DIGIT "." DIGIT`.
    UnknownProtocol,
    /// A second `Host` header was seen.
    DuplicateHost,
    /// A second `Content-Length` header disagreed with the first.
    InconsistentContentLength,
    /// The header block exceeded the configured budget.
    HeaderTooLarge,
    /// `Config::max_header_bytes` was below the 18-byte minimum.
    MaxHeaderBytesTooSmall,
    /// The source ended before a complete request was available.
    UnexpectedEof,
    /// `Content-Length`'s value was not a valid non-negative integer.
    ContentLengthParse,
    /// The byte source itself failed.
    Io(io::Error),
    /// The driver observed its own progress invariant being violated.
    /// This indicates a bug in this crate, not a malformed request.
    Internal,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingMethod => f.write_str("missing or invalid method"),
            Error::MissingRequestUri => f.write_str("missing request-target"),
            Error::MissingHeaderName => f.write_str("empty header field-name"),
            Error::MissingHeaderValue => f.write_str("missing header field-value"),
            Error::ExpectedSpace => f.write_str("expected a single space"),
            Error::ExpectedColon => f.write_str("expected ':' after header name"),
            Error::ExpectedCr => f.write_str("expected CR"),
            Error::ExpectedLf => f.write_str("expected LF after CR"),
            Error::UnknownProtocol => f.write_str("malformed HTTP-version"),
            Error::DuplicateHost => f.write_str("duplicate Host header"),
            Error::InconsistentContentLength => {
                f.write_str("conflicting Content-Length headers")
            }
            Error::HeaderTooLarge => f.write_str("header block exceeds configured maximum"),
            Error::MaxHeaderBytesTooSmall => {
                f.write_str("configured max_header_bytes is smaller than the shortest legal request")
            }
            Error::UnexpectedEof => f.write_str("source ended before the request was complete"),
            Error::ContentLengthParse => f.write_str("Content-Length value is not a valid integer"),
            Error::Io(e) => write!(f, "byte source error: {e}"),
            Error::Internal => f.write_str("internal parser invariant violated"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Log a fatal parse error at the appropriate level and return it.
///
/// Grammar violations are routine (a client simply sent garbage) and are
/// logged at `debug`; budget and internal-invariant failures are logged
/// at `warn` since they are more often indicative of resource pressure
/// or a bug.
pub(crate) fn log_fatal(err: Error) -> Error {
    match &err {
        Error::HeaderTooLarge | Error::Internal => {
            tracing::warn!(error = %err, "request parse failed");
        }
        _ => {
            tracing::debug!(error = %err, "request parse failed");
        }
    }
    err
}
