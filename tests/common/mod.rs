//! Shared utilities for integration tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use link_router::{Browser, Rule};

static NEXT_DIR: AtomicU32 = AtomicU32::new(0);

/// Build rules from `(id, pattern, target, priority)` tuples.
#[allow(dead_code)]
pub fn rules(entries: &[(u64, &str, &str, i32)]) -> Vec<Rule> {
    entries
        .iter()
        .map(|&(id, pattern, target, priority)| Rule::new(id, pattern, target, priority))
        .collect()
}

/// A small browser list: firefox, chrome, and a disabled edge.
#[allow(dead_code)]
pub fn browsers() -> Vec<Browser> {
    vec![
        Browser::new("firefox", "Mozilla Firefox", "/usr/bin/firefox"),
        Browser::new("chrome", "Google Chrome", "/usr/bin/google-chrome"),
        Browser::new("edge", "Microsoft Edge", "/usr/bin/microsoft-edge").with_enabled(false),
    ]
}

/// Create an empty, unique scratch directory under the system temp dir.
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "link-router-{}-{}-{}",
        name,
        std::process::id(),
        NEXT_DIR.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Config text with one firefox browser and one rule per `(id, pattern)`.
#[allow(dead_code)]
pub fn config_text(rules: &[(u64, &str)]) -> String {
    let mut text = String::from(
        "[[browsers]]\nid = \"firefox\"\nname = \"Mozilla Firefox\"\nexe_path = \"/usr/bin/firefox\"\n",
    );
    for (id, pattern) in rules {
        text.push_str(&format!(
            "\n[[rules]]\nid = {id}\npattern = \"{pattern}\"\ntarget = \"firefox\"\n"
        ));
    }
    text
}
