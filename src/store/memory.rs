//! In-memory rule store publishing immutable snapshots.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use arc_swap::ArcSwap;

use crate::observability::metrics;
use crate::pattern::validate_pattern;
use crate::routing::rule::{now_secs, sort_rules, Rule, RuleId};
use crate::store::{RuleStore, StoreError};

/// Rule store backed by an atomically swapped, pre-sorted vector.
///
/// Readers never block: `snapshot()` hands out the current `Arc`. Writers
/// are serialized, copy the current rules, apply their change, sort and
/// publish a new snapshot.
#[derive(Debug)]
pub struct InMemoryRuleStore {
    current: ArcSwap<Vec<Rule>>,
    /// Next id to hand out. Also serializes writers.
    next_id: Mutex<RuleId>,
}

impl Default for InMemoryRuleStore {
    fn default() -> Self {
        Self {
            current: ArcSwap::from_pointee(Vec::new()),
            next_id: Mutex::new(1),
        }
    }
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `rules`, validated and sorted.
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self, StoreError> {
        let store = Self::new();
        store.replace_all(rules)?;
        Ok(store)
    }

    /// Replace every rule at once. Nothing is published if any rule is invalid.
    pub fn replace_all(&self, rules: Vec<Rule>) -> Result<(), StoreError> {
        let mut seen = HashSet::with_capacity(rules.len());
        for rule in &rules {
            check_pattern(&rule.pattern)?;
            if !seen.insert(rule.id) {
                return Err(StoreError::DuplicateId(rule.id));
            }
        }

        let mut next_id = self.lock_writer();
        let max_id = rules.iter().map(|r| r.id).max().unwrap_or(0);
        *next_id = (*next_id).max(max_id + 1);
        self.publish(rules);
        Ok(())
    }

    pub fn get(&self, id: RuleId) -> Option<Rule> {
        self.current.load().iter().find(|r| r.id == id).cloned()
    }

    pub fn find_by_pattern(&self, pattern: &str) -> Option<Rule> {
        self.current.load().iter().find(|r| r.pattern == pattern).cloned()
    }

    /// Change the priority of rule `id` and re-sort.
    pub fn set_priority(&self, id: RuleId, priority: i32) -> Result<Rule, StoreError> {
        let _writer = self.lock_writer();
        let mut rules = self.current.load().as_ref().clone();

        let rule = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        rule.priority = priority;
        let updated = rule.clone();

        self.publish(rules);
        Ok(updated)
    }

    /// Highest priority in the store, `None` when empty.
    pub fn max_priority(&self) -> Option<i32> {
        self.current.load().iter().map(|r| r.priority).max()
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    fn lock_writer(&self) -> MutexGuard<'_, RuleId> {
        self.next_id.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, mut rules: Vec<Rule>) {
        sort_rules(&mut rules);
        metrics::record_rule_count(rules.len());
        tracing::debug!(rules = rules.len(), "Published rule snapshot");
        self.current.store(Arc::new(rules));
    }
}

impl RuleStore for InMemoryRuleStore {
    fn snapshot(&self) -> Arc<Vec<Rule>> {
        self.current.load_full()
    }

    fn add(&self, pattern: &str, target: &str, priority: i32) -> Result<Rule, StoreError> {
        check_pattern(pattern)?;

        let mut next_id = self.lock_writer();
        let mut rules = self.current.load().as_ref().clone();

        let saved = match rules.iter_mut().find(|r| r.pattern == pattern) {
            Some(existing) => {
                existing.target = target.to_string();
                existing.priority = priority;
                tracing::info!(rule_id = existing.id, pattern, target, "Updated rule");
                existing.clone()
            }
            None => {
                let rule = Rule {
                    id: *next_id,
                    pattern: pattern.to_string(),
                    target: target.to_string(),
                    priority,
                    created_at: now_secs(),
                };
                *next_id += 1;
                tracing::info!(rule_id = rule.id, pattern, target, "Added rule");
                rules.push(rule.clone());
                rule
            }
        };

        self.publish(rules);
        Ok(saved)
    }

    fn remove(&self, id: RuleId) -> Result<Rule, StoreError> {
        let _writer = self.lock_writer();
        let mut rules = self.current.load().as_ref().clone();

        let idx = rules
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = rules.remove(idx);

        tracing::info!(rule_id = id, pattern = %removed.pattern, "Removed rule");
        self.publish(rules);
        Ok(removed)
    }
}

fn check_pattern(pattern: &str) -> Result<(), StoreError> {
    validate_pattern(pattern).map_err(|source| StoreError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
