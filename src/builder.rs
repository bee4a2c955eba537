//! Projects the parser's consumed byte region into request-line
//! strings and header-map insertions (C3).
//!
//! Header lines are re-scanned independently of whatever state the
//! parser tracked for them: by the time a region reaches here, case
//! canonicalisation and the per-header value transform have already
//! been applied in place, so this module only needs to find `:` and
//! `\r`, cut, and trim.

use crate::classify::{is_horizontal_space, COLON, CR};
use crate::error::Error;
use crate::headers::Headers;
use crate::parser::RequestLineOffsets;

/// Slice `method`, `request_uri` and `proto` (plus major/minor) out of
/// the request-line prefix of the consumed region.
///
/// `region` must be the byte slice from absolute offset `0` through
/// `offsets.proto_end + 2` (i.e. including the request-line's
/// terminating `\r\n`).
pub fn request_line(region: &[u8], offsets: RequestLineOffsets) -> (String, String, String, u8, u8) {
    let method = String::from_utf8_lossy(&region[..offsets.method_end]).into_owned();
    let request_uri =
        String::from_utf8_lossy(&region[offsets.method_end + 1..offsets.target_end]).into_owned();
    let proto_bytes = &region[offsets.target_end + 1..offsets.proto_end];
    let proto = String::from_utf8_lossy(proto_bytes).into_owned();
    let proto_major = proto_bytes[5] - b'0';
    let proto_minor = proto_bytes[7] - b'0';
    (method, request_uri, proto, proto_major, proto_minor)
}

/// Scan zero or more complete `field-name ":" OWS field-value OWS CRLF`
/// lines out of `region` — which must end exactly at a line boundary —
/// and insert each into `headers`.
pub fn ingest_header_lines(region: &[u8], headers: &mut Headers) -> Result<(), Error> {
    let mut pos = 0;
    while pos < region.len() {
        let colon = memchr::memchr(COLON, &region[pos..])
            .map(|rel| pos + rel)
            .ok_or(Error::Internal)?;
        let cr = memchr::memchr(CR, &region[colon..])
            .map(|rel| colon + rel)
            .ok_or(Error::Internal)?;
        let name = String::from_utf8_lossy(&region[pos..colon]).into_owned();
        let value = String::from_utf8_lossy(trim_horizontal(&region[colon + 1..cr])).into_owned();
        headers.insert(name, value)?;
        pos = cr + 2;
    }
    Ok(())
}

fn trim_horizontal(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| !is_horizontal_space(b));
    let Some(start) = start else {
        return &[];
    };
    let end = bytes.iter().rposition(|&b| !is_horizontal_space(b)).map(|i| i + 1).unwrap_or(0);
    &bytes[start..end]
}
