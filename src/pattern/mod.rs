//! Pattern subsystem.
//!
//! # Data Flow
//! ```text
//! user pattern ("*.example.com", "example.com/**")
//!     → compiler.rs (tokenize, escape, anchor → CompiledPattern)
//!     → cache.rs (optional memo keyed by lowercase pattern)
//!     → matcher.rs (domain + path, then URL-aware inference)
//!     → bool
//! ```
//!
//! # Design Decisions
//! - Matching is case-insensitive on both sides
//! - A pattern must carry at least one literal character to be stored
//! - Compilation is pure and cheap; caching is an optimization only

pub mod cache;
pub mod compiler;
pub mod matcher;

pub use cache::PatternCache;
pub use compiler::{CompiledPattern, PatternError};
pub use matcher::{
    domain_to_pattern, is_valid_pattern, matches, matches_compiled, matches_normalized,
    validate_pattern,
};
