//! URL-aware pattern matching.
//!
//! # Responsibilities
//! - Decide whether a pattern matches a URL
//! - Validate patterns before they reach the rule store
//!
//! # Matching Order
//! ```text
//! 1. compiled pattern vs "domain + path"
//! 2. compiled pattern vs "domain"
//! 3. bare domain (no '*', '?', '/') vs any subdomain of it
//! 4. "*.base" vs "base" itself
//! ```
//!
//! # Design Decisions
//! - Steps 3 and 4 only run when the compiled pattern failed
//! - Step 3 ignores any pattern containing '/', even a domain with a path
//! - Bare domains are never rewritten into wildcard patterns

use crate::pattern::compiler::{CompiledPattern, PatternError};
use crate::uri::NormalizedUrl;

/// Returns true if `pattern` matches `url`. Empty inputs never match.
///
/// ```
/// use link_router::pattern::matches;
///
/// assert!(matches("google.com", "https://mail.google.com"));
/// assert!(matches("*.google.com", "https://google.com"));
/// assert!(!matches("example.com/*", "https://example.com/a/b"));
/// ```
pub fn matches(pattern: &str, url: &str) -> bool {
    if pattern.is_empty() || url.is_empty() {
        return false;
    }
    matches_normalized(pattern, &NormalizedUrl::parse(url))
}

/// Same as [`matches`] against a URL that was already decomposed.
pub fn matches_normalized(pattern: &str, url: &NormalizedUrl) -> bool {
    if pattern.is_empty() {
        return false;
    }
    match CompiledPattern::compile(pattern) {
        Ok(compiled) => matches_compiled(&compiled, url),
        Err(err) => {
            tracing::debug!(pattern, error = %err, "Pattern failed to compile, treating as no match");
            false
        }
    }
}

/// Same as [`matches`] with a pattern that was already compiled.
pub fn matches_compiled(compiled: &CompiledPattern, url: &NormalizedUrl) -> bool {
    if compiled.is_match(&url.full()) || compiled.is_match(&url.domain) {
        return true;
    }
    implied_by_domain(compiled.as_str(), &url.domain)
}

fn implied_by_domain(pattern: &str, domain: &str) -> bool {
    let is_bare_domain = !pattern.contains(|c: char| matches!(c, '*' | '?' | '/'));
    if is_bare_domain
        && domain
            .strip_suffix(pattern)
            .is_some_and(|prefix| prefix.ends_with('.'))
    {
        return true;
    }

    pattern
        .strip_prefix("*.")
        .is_some_and(|base| base == domain)
}

/// Check that `pattern` can be stored as a rule.
pub fn validate_pattern(pattern: &str) -> Result<(), PatternError> {
    if pattern.trim().is_empty() {
        return Err(PatternError::Empty);
    }

    let literal: String = pattern.chars().filter(|&c| !matches!(c, '*' | '?')).collect();
    if literal.trim().is_empty() {
        return Err(PatternError::WildcardOnly(pattern.to_string()));
    }

    CompiledPattern::compile(pattern).map(|_| ())
}

/// Returns true if `pattern` carries at least one literal character and compiles.
pub fn is_valid_pattern(pattern: &str) -> bool {
    validate_pattern(pattern).is_ok()
}

/// Suggest a pattern for `domain`.
///
/// Subdomains are already covered by [`matches`], so a bare domain is
/// returned as is. Blank input yields an empty string.
pub fn domain_to_pattern(domain: &str) -> String {
    if domain.trim().is_empty() {
        return String::new();
    }
    domain.to_string()
}
