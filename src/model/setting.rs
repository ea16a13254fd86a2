//! User preferences.

use serde::{Deserialize, Serialize};

/// Well-known setting keys.
pub mod keys {
    pub const ADVANCED_MODE: &str = "advanced_mode";
    pub const SHOW_INCOGNITO: &str = "show_incognito";
    pub const DARK_THEME: &str = "dark_theme";
    pub const SYSTEM_THEME: &str = "system_theme";
    pub const LAST_BROWSER: &str = "last_browser";
}

/// A single stored preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Setting {
    Toggle { key: String, value: bool },
    Text { key: String, value: String },
}

impl Setting {
    pub fn toggle(key: impl Into<String>, value: bool) -> Self {
        Setting::Toggle {
            key: key.into(),
            value,
        }
    }

    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Setting::Text {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Setting::Toggle { key, .. } | Setting::Text { key, .. } => key,
        }
    }
}

/// Look up a toggle, falling back to `default` when absent or not a toggle.
pub fn toggle_value(settings: &[Setting], key: &str, default: bool) -> bool {
    settings
        .iter()
        .rev()
        .find_map(|s| match s {
            Setting::Toggle { key: k, value } if k == key => Some(*value),
            _ => None,
        })
        .unwrap_or(default)
}

/// Look up a text setting.
pub fn text_value<'a>(settings: &'a [Setting], key: &str) -> Option<&'a str> {
    settings.iter().rev().find_map(|s| match s {
        Setting::Text { key: k, value } if k == key => Some(value.as_str()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let settings = vec![
            Setting::toggle(keys::SHOW_INCOGNITO, false),
            Setting::text(keys::LAST_BROWSER, "firefox"),
        ];

        assert!(!toggle_value(&settings, keys::SHOW_INCOGNITO, true));
        assert!(toggle_value(&settings, keys::SYSTEM_THEME, true));
        assert_eq!(text_value(&settings, keys::LAST_BROWSER), Some("firefox"));
        assert_eq!(text_value(&settings, keys::SHOW_INCOGNITO), None);
    }

    #[test]
    fn test_last_entry_wins() {
        let settings = vec![
            Setting::toggle(keys::DARK_THEME, false),
            Setting::toggle(keys::DARK_THEME, true),
        ];
        assert!(toggle_value(&settings, keys::DARK_THEME, false));
        assert_eq!(settings[1].key(), keys::DARK_THEME);
    }

    #[test]
    fn test_serde_tagging() {
        let setting: Setting = toml::from_str(
            r#"
            kind = "toggle"
            key = "advanced_mode"
            value = true
            "#,
        )
        .unwrap();
        assert_eq!(setting, Setting::toggle(keys::ADVANCED_MODE, true));
    }
}
