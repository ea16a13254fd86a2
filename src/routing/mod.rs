//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming URL (shell argument, OS handler)
//!     → dispatch.rs (repair scheme, pick browser or prompt)
//!     → resolver.rs (first matching rule in snapshot order)
//!     → pattern matcher (domain, path, subdomain inference)
//!     → Return: Decision::Launch or Decision::Prompt
//!
//! Rule ordering (owned by the store):
//!     Rule[]
//!     → Sort by priority desc, id asc
//!     → Freeze as immutable snapshot
//! ```
//!
//! # Design Decisions
//! - Deterministic: same snapshot and URL always yield the same rule
//! - First match wins (ordered by priority, oldest rule on ties)
//! - No match is a normal outcome, not an error

pub mod dispatch;
pub mod resolver;
pub mod rule;

pub use dispatch::{remember_choice, Decision, Dispatcher};
pub use resolver::{resolve, Resolver};
pub use rule::{Rule, RuleId};
