//! Rule lookup.
//!
//! # Responsibilities
//! - Find the first rule whose pattern matches a URL
//! - Return the matched rule or an explicit `None`
//!
//! # Design Decisions
//! - Rules arrive already ordered (priority desc, id asc); never re-sorted here
//! - Linear first-match scan, all tie-breaking lives in the input order
//! - The URL is decomposed once per call, not once per rule
//! - `Resolver` adds a compiled-pattern cache; results are identical to `resolve`

use crate::observability::metrics;
use crate::pattern::{matches_compiled, matches_normalized, PatternCache};
use crate::routing::rule::Rule;
use crate::uri::NormalizedUrl;

/// Return the first rule in `rules` whose pattern matches `url`.
///
/// ```
/// use link_router::routing::{resolve, Rule};
///
/// let rules = vec![
///     Rule::new(1, "*.github.com", "firefox", 10),
///     Rule::new(2, "github.com", "chrome", 5),
/// ];
/// let rule = resolve(&rules, "https://gist.github.com").unwrap();
/// assert_eq!(rule.target, "firefox");
/// assert!(resolve(&[], "https://github.com").is_none());
/// ```
pub fn resolve<'a>(rules: &'a [Rule], url: &str) -> Option<&'a Rule> {
    if rules.is_empty() || url.is_empty() {
        return None;
    }
    let normalized = NormalizedUrl::parse(url);
    rules
        .iter()
        .find(|rule| matches_normalized(&rule.pattern, &normalized))
}

/// Resolver that memoizes compiled patterns across calls.
///
/// Safe to share between threads; each call only reads the slice it is given.
#[derive(Debug, Default)]
pub struct Resolver {
    cache: PatternCache,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom pattern cache (e.g. a different capacity).
    pub fn with_cache(cache: PatternCache) -> Self {
        Self { cache }
    }

    /// Same contract as [`resolve`].
    pub fn resolve<'a>(&self, rules: &'a [Rule], url: &str) -> Option<&'a Rule> {
        if rules.is_empty() || url.is_empty() {
            metrics::record_resolution(false);
            return None;
        }

        let normalized = NormalizedUrl::parse(url);
        let found = rules.iter().find(|rule| self.rule_matches(rule, &normalized));

        match found {
            Some(rule) => tracing::debug!(
                domain = %normalized.domain,
                rule_id = rule.id,
                pattern = %rule.pattern,
                target = %rule.target,
                "Rule matched"
            ),
            None => tracing::debug!(
                domain = %normalized.domain,
                rules = rules.len(),
                "No rule matched"
            ),
        }
        metrics::record_resolution(found.is_some());

        found
    }

    /// Drop memoized patterns, e.g. after the rule set was replaced.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn rule_matches(&self, rule: &Rule, url: &NormalizedUrl) -> bool {
        if rule.pattern.is_empty() {
            return false;
        }
        match self.cache.get_or_compile(&rule.pattern) {
            Ok(compiled) => matches_compiled(&compiled, url),
            Err(err) => {
                tracing::warn!(rule_id = rule.id, pattern = %rule.pattern, error = %err, "Skipping rule with uncompilable pattern");
                false
            }
        }
    }
}
