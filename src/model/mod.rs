//! Plain data shared with the shell around the router: browsers and settings.

pub mod browser;
pub mod setting;

pub use browser::{Browser, LaunchPlan};
pub use setting::Setting;
