//! Idempotent snippet injection
//!
//! Pure text transforms: nothing here touches the filesystem. Callers read a
//! page, run [`apply`] for each rule, and decide whether to write the result.
//!
//! Per page and rule the flow is:
//!
//! ```text
//! excluded? ──yes──▶ Excluded
//!    │no
//! supersede legacy markup
//!    │
//! marker present? ──yes──▶ AlreadyPresent (or Replaced if legacy markup changed)
//!    │no
//! first matching anchor? ──no──▶ NoAnchor (original text returned)
//!    │yes
//! splice snippet ──▶ Inserted
//! ```
//!
//! A result that the supersede patterns would still edit on the next run is
//! discarded and reported as [`Outcome::Conflict`], so applying a rule twice
//! always gives the same text as applying it once.

use std::fmt;

use super::rule::{InjectionRule, Side, SupersedeMode};

/// Terminal state of one rule applied to one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Excluded,
    AlreadyPresent,
    NoAnchor,
    /// A supersede pattern matches the would-be result; page left untouched
    Conflict,
    Inserted,
    Replaced,
}

impl Outcome {
    /// Returns true if the page text changed
    pub fn is_change(&self) -> bool {
        matches!(self, Outcome::Inserted | Outcome::Replaced)
    }

    /// Returns true if an operator should look at the page
    pub fn needs_attention(&self) -> bool {
        matches!(self, Outcome::NoAnchor | Outcome::Conflict)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad so status lines can align on width
        f.pad(match self {
            Outcome::Excluded => "excluded",
            Outcome::AlreadyPresent => "already-present",
            Outcome::NoAnchor => "no-anchor-found",
            Outcome::Conflict => "conflict",
            Outcome::Inserted => "inserted",
            Outcome::Replaced => "replaced",
        })
    }
}

/// Where an anchor matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorMatch {
    /// Index into the rule's anchor list
    pub index: usize,
    pub side: Side,
    /// Byte offset the snippet is spliced at
    pub position: usize,
}

/// Returns true if the rule's marker occurs anywhere in `document`
pub fn check_applied(document: &str, rule: &InjectionRule) -> bool {
    document.contains(rule.marker())
}

/// Returns the first anchor, in priority order, that matches `document`
pub fn find_anchor(document: &str, rule: &InjectionRule) -> Option<AnchorMatch> {
    rule.anchors().iter().enumerate().find_map(|(index, anchor)| {
        anchor.pattern.find(document).map(|range| AnchorMatch {
            index,
            side: anchor.side,
            position: match anchor.side {
                Side::Before => range.start,
                Side::After => range.end,
            },
        })
    })
}

/// Applies `rule` to the page `file_name` whose text is `document`
pub fn apply(file_name: &str, document: &str, rule: &InjectionRule) -> (String, Outcome) {
    if rule.is_excluded(file_name) {
        return (document.to_string(), Outcome::Excluded);
    }

    let superseded = supersede(document, rule);

    let (result, outcome) = if check_applied(&superseded, rule) {
        if superseded == document {
            return (superseded, Outcome::AlreadyPresent);
        }
        (superseded, Outcome::Replaced)
    } else {
        let Some(found) = find_anchor(&superseded, rule) else {
            return (document.to_string(), Outcome::NoAnchor);
        };

        let snippet = rule.snippet_for(found.index);
        let mut spliced = String::with_capacity(superseded.len() + snippet.len());
        spliced.push_str(&superseded[..found.position]);
        spliced.push_str(snippet);
        spliced.push_str(&superseded[found.position..]);
        (spliced, Outcome::Inserted)
    };

    // a pattern may span the snippet edge, or the marker may have been cut
    if !check_applied(&result, rule) || supersede(&result, rule) != result {
        return (document.to_string(), Outcome::Conflict);
    }

    (result, outcome)
}

/// Removes or replaces legacy markup until no pattern changes the text.
/// In replace mode only the first match across all patterns receives the
/// snippet; later matches are removed.
fn supersede(document: &str, rule: &InjectionRule) -> String {
    let mut text = document.to_string();
    let mut placed = check_applied(document, rule);

    // a removal can join its neighbours into a new match
    loop {
        let next = supersede_pass(&text, rule, &mut placed);
        if next == text {
            return text;
        }
        text = next;
    }
}

/// One pass over every supersede pattern, in order
fn supersede_pass(document: &str, rule: &InjectionRule, placed: &mut bool) -> String {
    let mut text = document.to_string();

    for entry in rule.supersedes() {
        let matches = entry.pattern.find_all(&text);
        if matches.is_empty() {
            continue;
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for range in matches {
            out.push_str(&text[last..range.start]);
            if entry.mode == SupersedeMode::Replace && !*placed {
                out.push_str(rule.snippet());
                *placed = true;
            }
            last = range.end;
        }
        out.push_str(&text[last..]);
        text = out;
    }

    text
}
