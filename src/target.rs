//! Classifying and interpreting the `request-target` production.
//!
//! ```text
//! request-target = origin-form / absolute-form / authority-form / asterisk-form
//! origin-form     = absolute-path [ "?" query ]
//! absolute-form   = absolute-URI
//! authority-form  = authority
//! asterisk-form   = "*"
//! ```
//!
//! `authority-form` only occurs for `CONNECT`; `absolute-form` is most
//! common behind proxies. Full URI grammar validation is delegated to
//! the `url` crate for `absolute-form`; the other three forms don't
//! carry enough information to build a `url::Url` (no scheme), so they
//! keep their own pieces directly.

use url::Url;

/// The parsed shape of a request-target, verbatim string alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    /// `absolute-path [ "?" query ]`, e.g. `/index.html?a=b`. The most
    /// common form of request-target.
    OriginForm { path: String, query: Option<String> },
    /// A complete URI, most commonly seen behind proxies.
    AbsoluteForm(Url),
    /// `host [ ":" port ]`, used only for `CONNECT`.
    AuthorityForm(String),
    /// The literal `*`, used only for server-wide `OPTIONS`.
    AsteriskForm,
}

impl RequestTarget {
    /// Classify and parse a raw `request-target` string.
    ///
    /// This never fails: a request-target that isn't a parseable
    /// absolute-URI and doesn't start with `/` or equal `*` is treated
    /// as `authority-form`, matching the relaxed, best-effort authority
    /// parsing real proxies perform for `CONNECT`.
    pub fn parse(raw: &str) -> RequestTarget {
        if raw == "*" {
            return RequestTarget::AsteriskForm;
        }
        if let Some(rest) = raw.strip_prefix('/') {
            let (path, query) = match rest.split_once('?') {
                Some((p, q)) => (format!("/{p}"), Some(q.to_string())),
                None => (format!("/{rest}"), None),
            };
            return RequestTarget::OriginForm { path, query };
        }
        match Url::parse(raw) {
            Ok(url) => RequestTarget::AbsoluteForm(url),
            Err(_) => RequestTarget::AuthorityForm(raw.to_string()),
        }
    }

    /// The authority (`host[:port]`) this target names, if any.
    ///
    /// `origin-form` carries no authority of its own (it's relative to
    /// whatever connection it arrived on); `Host` derivation (§6) falls
    /// back to the `Host` header in that case.
    pub fn authority(&self) -> Option<String> {
        match self {
            RequestTarget::AbsoluteForm(url) => url.host_str().map(|host| match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            }),
            RequestTarget::AuthorityForm(authority) => Some(authority.clone()),
            RequestTarget::OriginForm { .. } | RequestTarget::AsteriskForm => None,
        }
    }
}
