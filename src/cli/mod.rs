//! # Command-Line Interface
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `pixel <ID>` | Install the Meta pixel |
//! | `param-builder` | Install the parameter builder bundle and init script |
//! | `cta` | Inject the footer call-to-action |
//! | `testimonials` | Inject the testimonial footer |
//! | `apply <FILE>` | Apply rules from a TOML rule file |
//! | `presets` | List built-in presets |
//!
//! ## Output
//!
//! One status line per page and rule on stdout, then a summary:
//!
//! ```text
//! [+] inserted         meta-pixel               index.html
//! [=] already-present  meta-pixel               blog.html
//! [!] no-anchor-found  meta-pixel               fragment.html
//! ```
//!
//! Use `--verbose` (or `-v`) for debug output on stderr.
//!
//! ## Exit Status
//!
//! - `0` - batch finished (pages without anchors are reported, not fatal)
//! - `1` - fatal error (bad rule file, unreadable directory)
//! - `2` - usage error (missing or invalid arguments)
//! - `3` - `--strict` and some page had no anchor or an I/O error
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod batch;
mod output;

pub use app::{run, Cli, Commands, EXIT_NEEDS_ATTENTION};
pub use batch::{apply_all, PageReport, RunSummary};
pub use output::Output;
