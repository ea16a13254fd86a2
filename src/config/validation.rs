//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (rules reference existing browsers)
//! - Reject patterns the matcher would never accept
//! - Validate observability values (log level, metrics address)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::config::schema::RouterConfig;
use crate::pattern::validate_pattern;
use crate::routing::RuleId;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("rule {rule_id}: invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        rule_id: RuleId,
        pattern: String,
        reason: String,
    },

    #[error("rule id {0} is used more than once")]
    DuplicateRuleId(RuleId),

    #[error("rule {rule_id}: target '{target}' is not a configured browser or profile")]
    UnknownTarget { rule_id: RuleId, target: String },

    #[error("browser id '{0}' is used more than once")]
    DuplicateBrowserId(String),

    #[error("browser with empty id")]
    EmptyBrowserId,

    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Check `config` for semantic errors.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut browser_ids = HashSet::new();
    for browser in config.browsers() {
        if browser.id.trim().is_empty() {
            errors.push(ValidationError::EmptyBrowserId);
        } else if !browser_ids.insert(browser.id.clone()) {
            errors.push(ValidationError::DuplicateBrowserId(browser.id));
        }
    }

    let mut rule_ids = HashSet::new();
    for rule in &config.rules {
        if !rule_ids.insert(rule.id) {
            errors.push(ValidationError::DuplicateRuleId(rule.id));
        }
        if let Err(e) = validate_pattern(&rule.pattern) {
            errors.push(ValidationError::InvalidPattern {
                rule_id: rule.id,
                pattern: rule.pattern.clone(),
                reason: e.to_string(),
            });
        }
        if !browser_ids.contains(&rule.target) {
            errors.push(ValidationError::UnknownTarget {
                rule_id: rule.id,
                target: rule.target.clone(),
            });
        }
    }

    let observability = &config.observability;
    if LevelFilter::from_str(&observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(observability.log_level.clone()));
    }
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::BrowserConfig;
    use crate::routing::Rule;

    fn browser(id: &str) -> BrowserConfig {
        BrowserConfig {
            id: id.to_string(),
            name: id.to_string(),
            exe_path: format!("/usr/bin/{id}").into(),
            icon_path: None,
            incognito_arg: None,
            enabled: true,
            profiles: Vec::new(),
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = RouterConfig::default();
        config.browsers.push(browser("firefox"));
        config.rules.push(Rule::new(1, "example.com", "firefox", 0));

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = RouterConfig::default();
        config.browsers.push(browser("firefox"));
        config.browsers.push(browser("firefox"));
        config.rules.push(Rule::new(1, "***", "firefox", 0));
        config.rules.push(Rule::new(1, "example.com", "opera", 0));
        config.observability.log_level = "loud".to_string();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".to_string();

        let errors = validate_config(&config).unwrap_err();

        assert!(errors.contains(&ValidationError::DuplicateBrowserId("firefox".into())));
        assert!(errors.contains(&ValidationError::DuplicateRuleId(1)));
        assert!(errors.contains(&ValidationError::UnknownTarget {
            rule_id: 1,
            target: "opera".into()
        }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidPattern { pattern, .. } if pattern == "***")));
        assert!(errors.contains(&ValidationError::InvalidLogLevel("loud".into())));
        assert!(errors.contains(&ValidationError::InvalidMetricsAddress("nowhere".into())));
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_profile_is_a_valid_target() {
        let mut firefox = browser("firefox");
        firefox.profiles.push(crate::config::schema::ProfileConfig {
            id: "firefox-work".into(),
            name: "Work".into(),
            profile_arg: "-P work".into(),
            enabled: true,
        });

        let mut config = RouterConfig::default();
        config.browsers.push(firefox);
        config.rules.push(Rule::new(1, "*.corp.example", "firefox-work", 0));

        assert!(validate_config(&config).is_ok());
    }
}
