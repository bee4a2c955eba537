//! Owns the peek/discard loop around a buffered source, enforces the
//! global byte budget, drives the parser to a terminal outcome, and
//! invokes the builder (C4).

use crate::builder;
use crate::classify;
use crate::config::{Config, MIN_HEADER_BYTES};
use crate::error::{log_fatal, Error};
use crate::headers::Headers;
use crate::parser::{Outcome, Parser, RequestLineOffsets};
use crate::request::Request;
use crate::source::ByteSource;

/// Read and fully validate one HTTP/1.x request-line + header block
/// from `source`, governed by `config`'s buffering and budget limits.
///
/// Blocks the calling thread only as long as `source.peek` does; the
/// parser itself never blocks or allocates on its hot path.
pub fn read_request<S: ByteSource>(source: &mut S, config: &Config) -> Result<Request, Error> {
    if config.max_header_bytes < MIN_HEADER_BYTES {
        return Err(log_fatal(Error::MaxHeaderBytesTooSmall));
    }

    let mut parser = Parser::new();
    let mut headers = Headers::new();
    let mut request_line: Option<(String, String, String, u8, u8)> = None;

    let mut remaining = config.max_header_bytes;
    let mut want_len = config.max_header_bytes.min(config.initial_peek);
    let mut pos = 0usize;
    let mut first_iteration = true;
    // Set whenever the driver asks for a bigger window: the very next
    // peek must deliver at least this many bytes, or the source is
    // truly exhausted and the request was truncated.
    let mut required_len: Option<usize> = None;
    // (next_pos, buf.len()) observed at the previous NeedMore, to catch
    // a parser that suspends without the driver making any progress —
    // the §4.4 progress invariant.
    let mut last_suspend: Option<(usize, usize)> = None;

    loop {
        let buf = source.peek(want_len)?;

        if first_iteration {
            if buf.is_empty() {
                return Err(log_fatal(Error::UnexpectedEof));
            }
            if !classify::is_token(buf[0]) {
                return Err(log_fatal(Error::MissingMethod));
            }
            first_iteration = false;
        }

        if let Some(required) = required_len.take() {
            if buf.len() < required {
                return Err(log_fatal(Error::UnexpectedEof));
            }
        }

        let (next_pos, min_len, outcome) = parser.step(buf, pos);

        match outcome {
            Outcome::Continue => {
                pos = next_pos;
            }
            Outcome::Fatal(e) => return Err(log_fatal(e)),
            Outcome::NeedMore => {
                if let Some(prev) = last_suspend {
                    if prev == (next_pos, buf.len()) {
                        return Err(log_fatal(Error::Internal));
                    }
                }
                last_suspend = Some((next_pos, buf.len()));

                if min_len > remaining {
                    return Err(log_fatal(Error::HeaderTooLarge));
                }

                // `min_len` is expressed in the current window's
                // coordinates; rebasing after a flush shifts it back
                // to the fresh (post-discard) window's coordinates.
                let min_len = if parser.at_line_boundary() && parser.line_start() > 0 {
                    let flush_end = parser.line_start();
                    flush(buf, flush_end, &mut parser, &mut request_line, &mut headers)?;
                    source.discard(flush_end);
                    remaining -= flush_end;
                    parser.rebase();
                    pos = 0;
                    last_suspend = None;
                    min_len - flush_end
                } else {
                    pos = next_pos;
                    min_len
                };

                want_len = min_len.max(config.advance_peek).min(remaining);
                required_len = Some(min_len.min(remaining));
            }
            Outcome::EndOfHeaders => {
                let header_end = parser.line_start();
                flush(buf, header_end, &mut parser, &mut request_line, &mut headers)?;
                source.discard(next_pos);

                let (method, request_uri, proto, proto_major, proto_minor) =
                    request_line.expect("request line is assembled on or before EndOfHeaders");
                return Request::finish(method, request_uri, proto, proto_major, proto_minor, headers);
            }
        }
    }
}

/// Ingest everything fully parsed so far: on the first call, slice out
/// the request-line fields too; every call ingests whatever header
/// lines sit in `buf[..header_end]`.
fn flush(
    buf: &mut [u8],
    header_end: usize,
    parser: &mut Parser,
    request_line: &mut Option<(String, String, String, u8, u8)>,
    headers: &mut Headers,
) -> Result<(), Error> {
    if request_line.is_none() {
        let offsets: RequestLineOffsets = parser.request_line_offsets();
        let line_region_end = offsets.proto_end + 2;
        *request_line = Some(builder::request_line(&buf[..line_region_end], offsets));
        builder::ingest_header_lines(&buf[line_region_end..header_end], headers)
    } else {
        builder::ingest_header_lines(&buf[..header_end], headers)
    }
}
