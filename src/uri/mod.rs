//! URL handling subsystem.
//!
//! # Data Flow
//! ```text
//! raw URL (shell argument, OS handler, user input)
//!     → normalize_url / is_valid_url (boundary checks)
//!     → NormalizedUrl::parse (percent-decode, split)
//!     → (domain, path) handed to the pattern matcher
//! ```

pub mod normalize;

pub use normalize::{
    extract_domain, extract_path, is_valid_url, normalize_url, NormalizedUrl,
};
