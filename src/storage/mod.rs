//! # Storage Layer
//!
//! Everything that touches the filesystem.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Pages | HTML (UTF-8) | `*.html` directly inside `--dir` |
//! | Rule files | TOML | path given to `pagepatch apply` |
//! | Global config | TOML | platform config dir, `config.toml` |
//!
//! ## Key Types
//!
//! - [`PageStore`] - List, read and atomically rewrite pages
//! - [`RulesFile`] - Rule file contents, compiled into [`InjectionRule`](crate::domain::InjectionRule)s
//! - [`GlobalConfig`] - User-wide defaults

mod config;
mod pages;

pub use config::{AnchorSpec, ConfigError, GlobalConfig, RuleSpec, RulesFile, SupersedeSpec};
pub use pages::{file_name, PageStore};
