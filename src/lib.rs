//! pagepatch - idempotent snippet injection for static HTML pages
//!
//! A rule names a marker, a snippet, and an ordered list of anchors. Applying
//! it to a page inserts the snippet at the first anchor that matches, unless
//! the marker is already there. Re-running is always safe.

pub mod cli;
pub mod domain;
pub mod presets;
pub mod storage;

pub use domain::{apply, check_applied, find_anchor, InjectionRule, Outcome, Side};
