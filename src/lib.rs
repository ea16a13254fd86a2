//! URL to browser routing library.
//!
//! Decides which browser should open a link by matching it against
//! user-defined wildcard rules.

pub mod config;
pub mod model;
pub mod observability;
pub mod pattern;
pub mod routing;
pub mod store;
pub mod uri;

pub use config::RouterConfig;
pub use model::{Browser, LaunchPlan, Setting};
pub use pattern::{is_valid_pattern, matches, CompiledPattern, PatternCache, PatternError};
pub use routing::{resolve, Decision, Dispatcher, Resolver, Rule, RuleId};
pub use store::{InMemoryRuleStore, RuleStore, StoreError};
pub use uri::{extract_domain, extract_path, is_valid_url, normalize_url};
