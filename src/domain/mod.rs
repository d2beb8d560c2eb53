//! Domain model for pagepatch
//!
//! Rules and the injection transform, without any I/O concerns.

mod injector;
mod rule;

pub use injector::{apply, check_applied, find_anchor, AnchorMatch, Outcome};
pub use rule::{
    Anchor, InjectionRule, Pattern, RuleBuilder, RuleError, Side, Supersede, SupersedeMode,
};
