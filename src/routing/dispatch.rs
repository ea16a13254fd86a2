//! Turning an incoming URL into something to do.
//!
//! # Responsibilities
//! - Repair URLs that arrive without a scheme
//! - Resolve a rule and map its target to a known browser
//! - Fall back to prompting the user, with a suggested pattern
//! - Remember a user's choice as a new rule
//!
//! # Design Decisions
//! - Disabled or unknown targets fall back to a prompt instead of failing
//! - Nothing is spawned here; callers get a `LaunchPlan` to execute

use serde::Serialize;

use crate::model::{Browser, LaunchPlan};
use crate::pattern::domain_to_pattern;
use crate::routing::resolver::Resolver;
use crate::routing::rule::Rule;
use crate::store::{RuleStore, StoreError};
use crate::uri::{extract_domain, is_valid_url, normalize_url};

/// Outcome of dispatching a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    /// A rule matched and its browser is available.
    Launch {
        rule: Rule,
        browser: Browser,
        url: String,
    },
    /// No usable rule; the caller should let the user choose.
    Prompt {
        url: String,
        /// Pattern to pre-fill for "always use this browser".
        suggested_pattern: String,
        /// Browser to pre-select, if one is remembered and still available.
        suggested_browser: Option<String>,
    },
}

impl Decision {
    pub fn url(&self) -> &str {
        match self {
            Decision::Launch { url, .. } | Decision::Prompt { url, .. } => url,
        }
    }

    /// Launch command for a `Launch` decision, `None` for a prompt.
    pub fn launch_plan(&self, incognito: bool) -> Option<LaunchPlan> {
        match self {
            Decision::Launch { browser, url, .. } => Some(browser.launch_plan(url, incognito)),
            Decision::Prompt { .. } => None,
        }
    }
}

/// Resolves URLs against a rule snapshot and a browser list.
#[derive(Debug, Default)]
pub struct Dispatcher {
    resolver: Resolver,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(resolver: Resolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Decide what to do with `raw_url`.
    ///
    /// `last_browser` is the id remembered from the previous prompt, used as
    /// the pre-selected choice when no rule applies.
    pub fn dispatch(
        &self,
        raw_url: &str,
        rules: &[Rule],
        browsers: &[Browser],
        last_browser: Option<&str>,
    ) -> Decision {
        let url = if is_valid_url(raw_url) {
            raw_url.to_string()
        } else {
            let normalized = normalize_url(raw_url);
            tracing::debug!(raw = raw_url, normalized = %normalized, "Normalized incoming URL");
            normalized
        };

        if let Some(rule) = self.resolver.resolve(rules, &url) {
            match find_enabled(browsers, &rule.target) {
                Some(browser) => {
                    tracing::info!(pattern = %rule.pattern, browser = %browser.id, "Found matching rule");
                    return Decision::Launch {
                        rule: rule.clone(),
                        browser: browser.clone(),
                        url,
                    };
                }
                None => tracing::warn!(
                    rule_id = rule.id,
                    target = %rule.target,
                    "Rule target is unknown or disabled, prompting instead"
                ),
            }
        }

        let suggested_browser = last_browser
            .and_then(|id| find_enabled(browsers, id))
            .map(|b| b.id.clone());

        Decision::Prompt {
            suggested_pattern: domain_to_pattern(&extract_domain(&url)),
            suggested_browser,
            url,
        }
    }
}

/// Store the user's "always use this browser" choice.
///
/// The pattern is trimmed; an existing rule with the same pattern is updated.
pub fn remember_choice<S: RuleStore + ?Sized>(
    store: &S,
    pattern: &str,
    browser_id: &str,
) -> Result<Rule, StoreError> {
    store.add(pattern.trim(), browser_id, 0)
}

fn find_enabled<'a>(browsers: &'a [Browser], id: &str) -> Option<&'a Browser> {
    browsers.iter().find(|b| b.id == id && b.enabled)
}
