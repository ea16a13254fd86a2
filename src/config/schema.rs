//! Configuration schema definitions.
//!
//! This module defines the configuration file layout for the router.
//! All types derive Serde traits for deserialization from TOML.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::setting::{self, keys};
use crate::model::{Browser, Setting};
use crate::routing::Rule;

/// Root configuration for the router.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Browsers rules may point at.
    pub browsers: Vec<BrowserConfig>,

    /// Routing rules, in any order.
    pub rules: Vec<Rule>,

    /// User preferences.
    pub settings: Vec<Setting>,
}

impl RouterConfig {
    /// All browsers, with each profile expanded into its own entry after its parent.
    pub fn browsers(&self) -> Vec<Browser> {
        let mut out = Vec::with_capacity(self.browsers.len());
        for config in &self.browsers {
            let browser = config.to_browser();
            let profiles: Vec<Browser> = config
                .profiles
                .iter()
                .map(|profile| {
                    browser
                        .with_profile(&profile.id, &profile.name, &profile.profile_arg)
                        .with_enabled(config.enabled && profile.enabled)
                })
                .collect();
            out.push(browser);
            out.extend(profiles);
        }
        out
    }

    /// Browser remembered from the last prompt.
    pub fn last_browser(&self) -> Option<&str> {
        setting::text_value(&self.settings, keys::LAST_BROWSER)
    }

    /// Whether private-window launches are offered.
    pub fn show_incognito(&self) -> bool {
        setting::toggle_value(&self.settings, keys::SHOW_INCOGNITO, true)
    }
}

/// Browser entry in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BrowserConfig {
    /// Unique id, referenced by `rules[].target`.
    pub id: String,

    /// Display name; also used to guess the private-window flag.
    pub name: String,

    /// Executable to launch.
    pub exe_path: PathBuf,

    #[serde(default)]
    pub icon_path: Option<PathBuf>,

    /// Overrides the private-window flag guessed from `name`.
    #[serde(default)]
    pub incognito_arg: Option<String>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Profiles of this browser, each usable as a rule target.
    #[serde(default)]
    pub profiles: Vec<ProfileConfig>,
}

impl BrowserConfig {
    fn to_browser(&self) -> Browser {
        let mut browser = Browser::new(&self.id, &self.name, &self.exe_path).with_enabled(self.enabled);
        browser.icon_path = self.icon_path.clone();
        if let Some(flag) = &self.incognito_arg {
            browser.incognito_arg = Some(flag.clone());
        }
        browser
    }
}

/// Profile of a browser in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileConfig {
    pub id: String,
    pub name: String,
    /// Argument selecting the profile, e.g. `-P work`.
    pub profile_arg: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub log_level: String,

    /// Enable metrics endpoint (`watch` mode only).
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9464".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
        [observability]
        log_level = "debug"

        [[browsers]]
        id = "firefox"
        name = "Mozilla Firefox"
        exe_path = "/usr/bin/firefox"

        [[browsers.profiles]]
        id = "firefox-work"
        name = "Work"
        profile_arg = "-P work"

        [[browsers]]
        id = "chrome"
        name = "Google Chrome"
        exe_path = "/usr/bin/google-chrome"
        enabled = false

        [[rules]]
        id = 1
        pattern = "*.github.com"
        target = "firefox-work"
        priority = 10

        [[settings]]
        kind = "text"
        key = "last_browser"
        value = "firefox"

        [[settings]]
        kind = "toggle"
        key = "show_incognito"
        value = false
    "#;

    #[test]
    fn test_parse_sample() {
        let config: RouterConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.observability.log_level, "debug");
        assert!(!config.observability.metrics_enabled);
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].priority, 10);
        assert_eq!(config.rules[0].created_at, 0);
        assert_eq!(config.last_browser(), Some("firefox"));
        assert!(!config.show_incognito());
    }

    #[test]
    fn test_browsers_expand_profiles() {
        let config: RouterConfig = toml::from_str(SAMPLE).unwrap();
        let browsers = config.browsers();

        let ids: Vec<&str> = browsers.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["firefox", "firefox-work", "chrome"]);

        let work = &browsers[1];
        assert!(work.is_profile);
        assert_eq!(work.profile_arg.as_deref(), Some("-P work"));
        assert_eq!(work.incognito_arg.as_deref(), Some("-private-window"));
        assert!(!browsers[2].enabled);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config, RouterConfig::default());
        assert_eq!(config.observability.log_level, "info");
        assert!(config.show_incognito());
    }
}
