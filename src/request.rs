//! The produced request value and the fields derived from it once the
//! header map is complete: `Host`, `Content-Length`, `Close`.

use crate::error::Error;
use crate::headers::Headers;
use crate::target::RequestTarget;

/// A fully parsed HTTP/1.x request-line and header block.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub request_uri: String,
    pub proto: String,
    pub proto_major: u8,
    pub proto_minor: u8,
    pub url: RequestTarget,
    pub headers: Headers,
    pub host: String,
    pub content_length: i64,
    pub close: bool,
}

impl Request {
    /// Assemble the final request value from the request-line fields
    /// and the fully-ingested header map, deriving `url`, `host`,
    /// `content_length` and `close`.
    pub(crate) fn finish(
        method: String,
        request_uri: String,
        proto: String,
        proto_major: u8,
        proto_minor: u8,
        mut headers: Headers,
    ) -> Result<Request, Error> {
        let url = RequestTarget::parse(&request_uri);

        promote_pragma(&mut headers);
        let content_length = content_length(&headers)?;

        let host = url
            .authority()
            .or_else(|| headers.get_first("Host").map(str::to_string))
            .unwrap_or_default();
        headers.remove("Host");

        let close = compute_close(proto_major, proto_minor, &headers);

        Ok(Request {
            method,
            request_uri,
            proto,
            proto_major,
            proto_minor,
            url,
            headers,
            host,
            content_length,
            close,
        })
    }
}

/// Promote a `Pragma: no-cache` to `Cache-Control: no-cache`, but only
/// when no `Cache-Control` header is already present. `Pragma` itself
/// is left in the header map untouched, and any other `Pragma` value
/// is not promoted.
fn promote_pragma(headers: &mut Headers) {
    if headers.get("Cache-Control").is_some() {
        return;
    }
    if headers.get_first("Pragma") == Some("no-cache") {
        // Headers::insert only special-cases Host/Content-Length;
        // a fresh Cache-Control key always succeeds.
        let _ = headers.insert("Cache-Control".to_string(), "no-cache".to_string());
    }
}

fn content_length(headers: &Headers) -> Result<i64, Error> {
    match headers.get_first("Content-Length") {
        None => Ok(-1),
        Some(raw) => {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::ContentLengthParse);
            }
            raw.parse::<i64>().map_err(|_| Error::ContentLengthParse)
        }
    }
}

fn has_connection_directive(headers: &Headers, directive: &str) -> bool {
    match headers.get("Connection") {
        None => false,
        Some(values) => values.iter().any(|value| {
            value
                .split(',')
                .map(|part| part.trim_matches(|c: char| c == ' ' || c == '\t'))
                .any(|part| part.eq_ignore_ascii_case(directive))
        }),
    }
}

/// See the `close` computation table; an absent or empty `Connection`
/// header (no recognised directive) is treated identically to no
/// header at all.
fn compute_close(proto_major: u8, proto_minor: u8, headers: &Headers) -> bool {
    if proto_major < 1 || proto_major >= 2 {
        return true;
    }
    let close = has_connection_directive(headers, "close");
    let keep_alive = has_connection_directive(headers, "keep-alive");
    if proto_minor == 0 {
        match (close, keep_alive) {
            (false, false) => true,
            (false, true) => false,
            (true, false) => true,
            (true, true) => false,
        }
    } else {
        match (close, keep_alive) {
            (false, false) => true,
            (false, true) => false,
            (true, false) => true,
            (true, true) => true,
        }
    }
}
