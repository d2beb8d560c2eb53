//! Console output for CLI commands

use crate::domain::Outcome;

/// Output helper for consistent formatting
pub struct Output {
    verbose: bool,
}

impl Output {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        println!("{}", message);
    }

    /// Prints the status line for one rule applied to one page
    pub fn status(&self, page: &str, rule: &str, outcome: Outcome) {
        let icon = match outcome {
            Outcome::Inserted | Outcome::Replaced => "+",
            Outcome::AlreadyPresent => "=",
            Outcome::Excluded => "-",
            Outcome::NoAnchor | Outcome::Conflict => "!",
        };
        println!("[{}] {:<16} {:<24} {}", icon, outcome, rule, page);
    }

    /// Prints the status line for a page that could not be processed
    pub fn failure(&self, page: &str, message: &str) {
        println!("[x] {:<16} {:<24} {}: {}", "error", "-", page, message);
    }

    /// Prints a blank line
    pub fn blank(&self) {
        println!();
    }

    /// Returns true if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
