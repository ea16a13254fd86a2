//! Rule definition and ordering.

use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Ordering key of a rule. Lower ids are older and win priority ties.
pub type RuleId = u64;

/// Association between a pattern and a target browser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    /// Wildcard pattern matched against domain and path.
    pub pattern: String,
    /// Id of the browser to open.
    pub target: String,
    /// Higher priority is checked first.
    #[serde(default)]
    pub priority: i32,
    /// Creation time, seconds since the Unix epoch.
    #[serde(default)]
    pub created_at: u64,
}

impl Rule {
    /// Create a rule stamped with the current time.
    pub fn new(id: RuleId, pattern: impl Into<String>, target: impl Into<String>, priority: i32) -> Self {
        Self {
            id,
            pattern: pattern.into(),
            target: target.into(),
            priority,
            created_at: now_secs(),
        }
    }

    pub fn with_id(mut self, id: RuleId) -> Self {
        self.id = id;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Resolution order: priority descending, then id ascending.
pub fn resolution_order(a: &Rule, b: &Rule) -> Ordering {
    b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id))
}

/// Sort `rules` into resolution order.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(resolution_order);
}

/// Returns true if `rules` is already in resolution order.
pub fn is_sorted(rules: &[Rule]) -> bool {
    rules
        .windows(2)
        .all(|pair| resolution_order(&pair[0], &pair[1]) != Ordering::Greater)
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
