//! Configuration loading and hot reload.

use std::time::Duration;

use link_router::config::{load_config, ConfigError, ConfigWatcher};
use link_router::store::{InMemoryRuleStore, RuleStore};

mod common;

#[test]
fn test_load_config_from_disk() {
    let dir = common::scratch_dir("load");
    let path = dir.join("router.toml");
    std::fs::write(&path, common::config_text(&[(1, "example.com"), (2, "*.github.com")])).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.rules.len(), 2);

    let store = InMemoryRuleStore::from_rules(config.rules).unwrap();
    let snapshot = store.snapshot();
    assert_eq!(link_router::resolve(&snapshot, "https://gist.github.com").map(|r| r.id), Some(2));
}

#[test]
fn test_invalid_config_reports_every_problem() {
    let dir = common::scratch_dir("invalid");
    let path = dir.join("router.toml");
    let mut text = common::config_text(&[(1, "**"), (1, "example.com")]);
    text.push_str("\n[observability]\nlog_level = \"chatty\"\n");
    std::fs::write(&path, text).unwrap();

    match load_config(&path) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3),
        other => panic!("expected validation errors, got {other:?}"),
    }
}

#[tokio::test]
async fn test_watcher_sends_reloaded_config() {
    let dir = common::scratch_dir("watch");
    let path = dir.join("router.toml");
    std::fs::write(&path, common::config_text(&[(1, "example.com")])).unwrap();

    let initial = load_config(&path).unwrap();
    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _handle = watcher.with_current(initial).run().unwrap();

    // Give the backend a moment to register before changing the file.
    tokio::time::sleep(Duration::from_millis(200)).await;
    std::fs::write(&path, common::config_text(&[(1, "example.com"), (2, "docs.rs")])).unwrap();

    let reloaded = tokio::time::timeout(Duration::from_secs(10), updates.recv())
        .await
        .expect("no reload within timeout")
        .expect("watcher channel closed");
    assert_eq!(reloaded.rules.len(), 2);
    assert_eq!(reloaded.rules[1].pattern, "docs.rs");
}
