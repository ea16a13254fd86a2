//! URL normalization and decomposition.
//!
//! # Responsibilities
//! - Split a raw URL into a lowercase host and a path
//! - Turn bare hostnames into full URLs
//! - Check the scheme before a URL enters the matching pipeline
//!
//! # Design Decisions
//! - Never fails: malformed input degrades to best-effort string slicing
//! - Input is percent-decoded before parsing (lossy, invalid UTF-8 is replaced)
//! - Host is lowercased here, path casing is left to the matcher
//! - Punycode hosts are turned back into Unicode so `bücher.de` patterns match
//! - IPv4 hosts keep the parser's canonical dotted form (`0x7f.1` becomes
//!   `127.0.0.1`), so patterns must be written against that form
//! - An empty string stands in for an absent value

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::{Host, Url};

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// A URL reduced to the two parts patterns are matched against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedUrl {
    /// Lowercase host without port. Empty when the URL has no usable host.
    pub domain: String,
    /// Path component, either empty or starting with `/`. Case preserved.
    pub path: String,
}

impl NormalizedUrl {
    /// Decompose `raw` into domain and path.
    pub fn parse(raw: &str) -> Self {
        Self {
            domain: extract_domain(raw),
            path: extract_path(raw),
        }
    }

    /// Domain followed by path, the candidate string for path-aware patterns.
    pub fn full(&self) -> String {
        let mut full = String::with_capacity(self.domain.len() + self.path.len());
        full.push_str(&self.domain);
        full.push_str(&self.path);
        full
    }
}

/// Extract the lowercase host of `raw`.
///
/// Falls back to manual slicing when the string does not parse as a URL:
/// the `http://`/`https://` prefix is dropped, then everything from the first
/// `/` and the first `:` is cut off.
pub fn extract_domain(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let decoded = decode(raw);
    match Url::parse(&decoded) {
        Ok(url) => match url.host() {
            Some(Host::Domain(domain)) => unicode_host(domain),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        Err(err) => {
            tracing::trace!(error = %err, "URL did not parse, slicing domain manually");
            slice_domain(&decoded)
        }
    }
}

/// Extract the path of `raw`, or an empty string if it has none.
pub fn extract_path(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let decoded = decode(raw);
    let url = match Url::parse(&decoded) {
        Ok(url) => url,
        Err(_) => return String::new(),
    };

    // The parser reports "/" for `https://host`; only keep a path the input spelled out.
    if url.cannot_be_a_base() || !has_explicit_path(&decoded) {
        return String::new();
    }

    decode(url.path()).into_owned()
}

/// Trim `raw` and make sure it carries an `http://` or `https://` scheme.
///
/// ```
/// use link_router::uri::normalize_url;
///
/// assert_eq!(normalize_url("google.com"), "https://google.com");
/// assert_eq!(normalize_url("  http://x.com  "), "http://x.com");
/// ```
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with(HTTP_PREFIX) || trimmed.starts_with(HTTPS_PREFIX) {
        return trimmed.to_string();
    }
    format!("{HTTPS_PREFIX}{trimmed}")
}

/// Returns true if `raw` parses and its scheme is exactly `http` or `https`.
pub fn is_valid_url(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn decode(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

fn unicode_host(domain: &str) -> String {
    let (unicode, result) = idna::domain_to_unicode(domain);
    if let Err(err) = result {
        tracing::trace!(domain, error = ?err, "Host is not valid IDNA, keeping parser form");
        return domain.to_lowercase();
    }
    unicode.to_lowercase()
}

fn slice_domain(decoded: &str) -> String {
    let without_scheme = decoded
        .strip_prefix(HTTPS_PREFIX)
        .or_else(|| decoded.strip_prefix(HTTP_PREFIX))
        .unwrap_or(decoded);

    let host = without_scheme.split('/').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.to_lowercase()
}

fn has_explicit_path(decoded: &str) -> bool {
    let Some(idx) = decoded.find("://") else {
        return false;
    };
    let rest = &decoded[idx + 3..];
    let before_query = rest
        .find(|c: char| c == '?' || c == '#')
        .map_or(rest, |end| &rest[..end]);
    before_query.contains('/')
}
