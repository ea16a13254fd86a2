//! End-to-end matching and resolution behaviour.

use link_router::routing::resolve;
use link_router::store::{InMemoryRuleStore, RuleStore};
use link_router::{
    extract_domain, is_valid_pattern, is_valid_url, matches, normalize_url, Decision, Dispatcher,
    Resolver,
};

mod common;

const DOMAINS: &[&str] = &[
    "example.com",
    "github.com",
    "docs.rs",
    "news.ycombinator.com",
    "bücher.de",
];

#[test]
fn test_literal_domain_matches_itself_and_www() {
    for d in DOMAINS {
        assert!(matches(d, &format!("https://{d}")), "{d}");
        assert!(matches(d, &format!("https://www.{d}")), "www.{d}");
        assert!(matches(d, &format!("https://{d}/some/path?q=1")), "{d} with path");
    }
}

#[test]
fn test_wildcard_subdomain_matches_base_and_sub() {
    for d in DOMAINS {
        let pattern = format!("*.{d}");
        assert!(matches(&pattern, &format!("https://{d}")), "{pattern} base");
        assert!(matches(&pattern, &format!("https://sub.{d}")), "{pattern} sub");
    }
}

#[test]
fn test_unrelated_domains_do_not_match() {
    for a in DOMAINS {
        for b in DOMAINS {
            if a != b && !b.ends_with(&format!(".{a}")) {
                assert!(!matches(a, &format!("https://{b}")), "{a} vs {b}");
            }
        }
    }
    assert!(!matches("example.com", "https://notexample.com"));
}

#[test]
fn test_unicode_host_rule_resolves() {
    let rules = common::rules(&[(1, "bücher.de", "firefox", 0), (2, "*.bücher.de", "chrome", 0)]);
    assert_eq!(resolve(&rules, "https://www.bücher.de/neu").map(|r| r.id), Some(1));
    assert!(is_valid_pattern("bücher.de"));
}

#[test]
fn test_path_wildcards() {
    assert!(matches("example.com/**", "https://example.com/a/b/c"));
    assert!(matches("example.com/*", "https://example.com/a"));
    assert!(!matches("example.com/*", "https://example.com/a/b"));
}

#[test]
fn test_percent_encoded_input() {
    assert!(matches("example.com/a b", "https://example.com/a%20b"));
    assert_eq!(extract_domain("https%3A%2F%2FExample.com%2Fx"), "example.com");
}

#[test]
fn test_boundary_helpers() {
    assert!(!is_valid_pattern("***"));
    assert!(is_valid_pattern("google.com"));
    assert!(!is_valid_pattern(""));

    assert_eq!(normalize_url("google.com"), "https://google.com");
    assert_eq!(normalize_url("  http://x.com  "), "http://x.com");

    assert_eq!(extract_domain(""), "");
    assert!(!is_valid_url(""));
    assert!(!is_valid_url("ftp://x.com"));
}

#[test]
fn test_priority_then_id_ordering() {
    let store = InMemoryRuleStore::new();
    store.add("example.com", "chrome", 0).unwrap();
    store.add("*.example.com", "firefox", 5).unwrap();
    store.add("www.example.com", "edge", 5).unwrap();

    let snapshot = store.snapshot();
    let rule = resolve(&snapshot, "https://www.example.com").unwrap();
    assert_eq!(rule.pattern, "*.example.com");
    assert_eq!(rule.target, "firefox");
}

#[test]
fn test_resolve_empty_and_miss() {
    assert!(resolve(&[], "https://example.com").is_none());

    let rules = common::rules(&[(1, "github.com", "firefox", 0)]);
    assert!(resolve(&rules, "https://example.com").is_none());
}

#[test]
fn test_cached_resolver_agrees_with_pure_resolve() {
    let rules = common::rules(&[
        (1, "example.com/docs/**", "firefox", 10),
        (2, "*.example.com", "chrome", 5),
        (3, "example.???", "edge", 0),
    ]);
    let resolver = Resolver::new();
    let urls = [
        "https://example.com/docs/a/b",
        "https://api.example.com/v1",
        "https://example.org",
        "https://example.com",
        "https://unrelated.net",
        "",
    ];
    for _ in 0..2 {
        for url in urls {
            assert_eq!(
                resolver.resolve(&rules, url).map(|r| r.id),
                resolve(&rules, url).map(|r| r.id),
                "{url}"
            );
        }
    }
}

#[test]
fn test_dispatch_then_remember() {
    let store = InMemoryRuleStore::new();
    let dispatcher = Dispatcher::new();
    let browsers = common::browsers();

    let first = dispatcher.dispatch("blog.rust-lang.org/2024", &store.snapshot(), &browsers, None);
    let pattern = match first {
        Decision::Prompt { suggested_pattern, .. } => suggested_pattern,
        other => panic!("expected prompt, got {other:?}"),
    };
    assert_eq!(pattern, "blog.rust-lang.org");

    link_router::routing::remember_choice(&store, &pattern, "chrome").unwrap();

    let second = dispatcher.dispatch("https://blog.rust-lang.org/2024", &store.snapshot(), &browsers, None);
    match second {
        Decision::Launch { browser, .. } => assert_eq!(browser.id, "chrome"),
        other => panic!("expected launch, got {other:?}"),
    }
}
