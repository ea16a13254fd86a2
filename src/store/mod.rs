//! Rule storage.
//!
//! # Data Flow
//! ```text
//! rule edits (add / remove / reprioritise / config reload)
//!     → pattern validation (invalid patterns never enter a snapshot)
//!     → sort by priority desc, id asc
//!     → publish Arc<Vec<Rule>> snapshot
//!     → resolvers read one snapshot per lookup
//! ```
//!
//! # Design Decisions
//! - The store owns ordering; resolvers trust it
//! - Snapshots are immutable; edits publish a new one
//! - Persistence is left to other implementations of `RuleStore`

pub mod memory;

use std::sync::Arc;

use thiserror::Error;

use crate::pattern::PatternError;
use crate::routing::rule::{Rule, RuleId};

pub use memory::InMemoryRuleStore;

/// Errors returned by rule store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("rule {0} not found")]
    NotFound(RuleId),

    #[error("rule id {0} used more than once")]
    DuplicateId(RuleId),
}

/// Source of ordered rule snapshots.
pub trait RuleStore: Send + Sync {
    /// Current rules, sorted by priority (desc) then id (asc).
    fn snapshot(&self) -> Arc<Vec<Rule>>;

    /// Add a rule, or update the rule that already has this exact pattern.
    fn add(&self, pattern: &str, target: &str, priority: i32) -> Result<Rule, StoreError>;

    /// Remove rule `id`, returning it.
    fn remove(&self, id: RuleId) -> Result<Rule, StoreError>;
}
