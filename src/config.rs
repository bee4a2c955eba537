//! Tunables for the driver's buffering strategy.

/// The shortest possible legal request: `"M / HTTP/0.0\r\n\r\n"`.
pub const MIN_HEADER_BYTES: usize = 18;

const DEFAULT_MAX_HEADER_BYTES: usize = 1024 * 1024;
const DEFAULT_INITIAL_PEEK: usize = 8 * 1024;
const DEFAULT_ADVANCE_PEEK: usize = 4 * 1024;

/// How much a single [`crate::read_request`] call is willing to buffer
/// and how it grows that buffer as more bytes are needed.
///
/// The defaults match common HTTP/1.1 server practice: a generous 1 MiB
/// cap on the header block, an initial peek large enough to cover the
/// overwhelming majority of real requests in one read, and a smaller
/// incremental peek for the (rarer) case of a request that needs more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Hard cap on the number of bytes consumed for the request-line and
    /// headers combined, through the terminating `\r\n\r\n`.
    pub max_header_bytes: usize,
    /// How many bytes to request from the source on the very first peek.
    pub initial_peek: usize,
    /// How many additional bytes to request on each subsequent peek.
    pub advance_peek: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            initial_peek: DEFAULT_INITIAL_PEEK,
            advance_peek: DEFAULT_ADVANCE_PEEK,
        }
    }
}

impl Config {
    /// Build a `Config` with a caller-chosen header budget, keeping the
    /// default peek sizes.
    pub fn with_max_header_bytes(max_header_bytes: usize) -> Self {
        Config {
            max_header_bytes,
            ..Config::default()
        }
    }
}
