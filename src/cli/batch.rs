//! Batch driver
//!
//! Applies a list of rules to every page in a [`PageStore`]. Each page is
//! read once, run through all rules in memory, and written at most once.
//! A page that fails to read or write is reported and skipped; the batch
//! carries on with the next page.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::domain::{self, InjectionRule, Outcome};
use crate::storage::{file_name, PageStore};

/// Result of processing one page
#[derive(Debug)]
pub struct PageReport {
    pub page: String,
    /// `(rule name, outcome)` in rule order, or the I/O error
    pub result: Result<Vec<(String, Outcome)>, String>,
    pub changed: bool,
}

impl PageReport {
    pub fn needs_attention(&self) -> bool {
        match &self.result {
            Ok(outcomes) => outcomes.iter().any(|(_, o)| o.needs_attention()),
            Err(_) => true,
        }
    }
}

/// Totals over a batch
#[derive(Debug, Default)]
pub struct RunSummary {
    pub pages: usize,
    pub changed: usize,
    pub errors: usize,
    pub outcomes: BTreeMap<Outcome, usize>,
}

impl RunSummary {
    fn record(&mut self, report: &PageReport) {
        self.pages += 1;
        if report.changed {
            self.changed += 1;
        }
        match &report.result {
            Ok(outcomes) => {
                for (_, outcome) in outcomes {
                    *self.outcomes.entry(*outcome).or_default() += 1;
                }
            }
            Err(_) => self.errors += 1,
        }
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Returns true if any page had no anchor, a conflict or an I/O error
    pub fn needs_attention(&self) -> bool {
        self.errors > 0 || self.outcomes.keys().any(|o| o.needs_attention())
    }
}

/// Applies all rules to one page's text, in order
pub fn apply_all(page: &str, document: &str, rules: &[InjectionRule]) -> (String, Vec<(String, Outcome)>) {
    let mut current = document.to_string();
    let mut outcomes = Vec::with_capacity(rules.len());

    for rule in rules {
        let (next, outcome) = domain::apply(page, &current, rule);
        current = next;
        outcomes.push((rule.name().to_string(), outcome));
    }

    (current, outcomes)
}

fn process_page(
    store: &PageStore,
    path: &Path,
    rules: &[InjectionRule],
    dry_run: bool,
) -> PageReport {
    let page = file_name(path);

    let document = match store.read(path) {
        Ok(d) => d,
        Err(e) => {
            return PageReport {
                page,
                result: Err(format!("{:#}", e)),
                changed: false,
            }
        }
    };

    let (updated, outcomes) = apply_all(&page, &document, rules);
    let changed = outcomes.iter().any(|(_, o)| o.is_change());

    if changed && !dry_run {
        if let Err(e) = store.write(path, &updated) {
            return PageReport {
                page,
                result: Err(format!("{:#}", e)),
                changed: false,
            };
        }
    }

    PageReport {
        page,
        result: Ok(outcomes),
        changed,
    }
}

/// Explains a status line that needs attention, for verbose output
fn attention_detail(rule: &InjectionRule, outcome: Outcome) -> Option<String> {
    let list = |patterns: Vec<String>| patterns.join(", ");
    match outcome {
        Outcome::NoAnchor => Some(format!(
            "anchors tried: {}",
            list(rule.anchors().iter().map(|a| a.pattern.to_string()).collect())
        )),
        Outcome::Conflict => Some(format!(
            "supersede patterns still match after injection: {}",
            list(rule.supersedes().iter().map(|s| s.pattern.to_string()).collect())
        )),
        _ => None,
    }
}

/// Runs the batch over every page in `store`
pub fn run(
    store: &PageStore,
    rules: &[InjectionRule],
    dry_run: bool,
    output: &Output,
) -> Result<RunSummary> {
    let pages = store.list()?;
    output.verbose_ctx(
        "batch",
        &format!("{} page(s) in {}", pages.len(), store.dir().display()),
    );

    let mut summary = RunSummary::default();

    for path in &pages {
        let report = process_page(store, path, rules, dry_run);

        match &report.result {
            Ok(outcomes) => {
                for (rule, outcome) in outcomes {
                    output.status(&report.page, rule, *outcome);
                }
                if output.is_verbose() {
                    for (rule, (_, outcome)) in rules.iter().zip(outcomes) {
                        if let Some(detail) = attention_detail(rule, *outcome) {
                            output.verbose_ctx(rule.name(), &detail);
                        }
                    }
                }
            }
            Err(message) => output.failure(&report.page, message),
        }

        summary.record(&report);
    }

    output.blank();
    output.success(&format!(
        "{} page(s): {} {}, {} inserted, {} replaced, {} already present, {} without anchor, {} conflict(s), {} excluded, {} error(s)",
        summary.pages,
        summary.changed,
        if dry_run { "would change" } else { "changed" },
        summary.count(Outcome::Inserted),
        summary.count(Outcome::Replaced),
        summary.count(Outcome::AlreadyPresent),
        summary.count(Outcome::NoAnchor),
        summary.count(Outcome::Conflict),
        summary.count(Outcome::Excluded),
        summary.errors,
    ));

    Ok(summary)
}
