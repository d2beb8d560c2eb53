//! Injection rule model
//!
//! A rule says what to insert (`snippet`), how to recognise that it is
//! already there (`marker`), and where it may go (`anchors`, tried in order).
//! Rules are validated once at construction so a bad rule never reaches the
//! per-file loop.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Rule '{0}' has no anchors")]
    NoAnchors(String),

    #[error("Rule '{0}' has an empty marker")]
    EmptyMarker(String),

    #[error("Rule '{rule}': snippet does not contain marker '{marker}'")]
    MarkerNotInSnippet { rule: String, marker: String },

    #[error("Rule '{rule}': supersede pattern matches its own snippet: {pattern}")]
    SupersedeMatchesSnippet { rule: String, pattern: String },

    #[error("Rule '{rule}': empty pattern")]
    EmptyPattern { rule: String },

    #[error("Rule '{rule}': invalid regex '{pattern}': {source}")]
    InvalidRegex {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid side '{0}': expected 'before' or 'after'")]
    InvalidSide(String),

    #[error("Invalid supersede mode '{0}': expected 'remove' or 'replace'")]
    InvalidSupersedeMode(String),
}

/// Which side of an anchor match the snippet is spliced on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Before => write!(f, "before"),
            Side::After => write!(f, "after"),
        }
    }
}

impl FromStr for Side {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "before" => Ok(Side::Before),
            "after" => Ok(Side::After),
            _ => Err(RuleError::InvalidSide(s.to_string())),
        }
    }
}

/// A literal substring or a compiled regular expression
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    pub fn literal(text: impl Into<String>) -> Self {
        Pattern::Literal(text.into())
    }

    /// Compiles a regex pattern. `rule` is only used for error messages.
    pub fn regex(rule: &str, source: &str) -> Result<Self, RuleError> {
        Regex::new(source)
            .map(Pattern::Regex)
            .map_err(|source_err| RuleError::InvalidRegex {
                rule: rule.to_string(),
                pattern: source.to_string(),
                source: source_err,
            })
    }

    /// Byte range of the first match in `text`
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        match self {
            Pattern::Literal(lit) => text.find(lit.as_str()).map(|start| start..start + lit.len()),
            Pattern::Regex(re) => re.find(text).map(|m| m.range()),
        }
    }

    /// Byte ranges of all non-overlapping matches in `text`
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        match self {
            Pattern::Literal(lit) => text
                .match_indices(lit.as_str())
                .map(|(start, m)| start..start + m.len())
                .collect(),
            Pattern::Regex(re) => re.find_iter(text).map(|m| m.range()).collect(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Pattern::Literal(lit) => lit.is_empty(),
            Pattern::Regex(re) => re.as_str().is_empty(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(lit) => write!(f, "{:?}", lit),
            Pattern::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// A candidate insertion point
#[derive(Debug, Clone)]
pub struct Anchor {
    pub pattern: Pattern,
    pub side: Side,

    /// Replaces the rule's snippet when this anchor is the one used
    pub snippet: Option<String>,
}

impl Anchor {
    pub fn new(pattern: Pattern, side: Side) -> Self {
        Self {
            pattern,
            side,
            snippet: None,
        }
    }
}

/// What to do with legacy markup a rule retires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupersedeMode {
    /// Delete every match
    #[default]
    Remove,
    /// Put the snippet where the first match was, delete the rest
    Replace,
}

impl FromStr for SupersedeMode {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remove" | "delete" => Ok(SupersedeMode::Remove),
            "replace" => Ok(SupersedeMode::Replace),
            _ => Err(RuleError::InvalidSupersedeMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Supersede {
    pub pattern: Pattern,
    pub mode: SupersedeMode,
}

/// Immutable description of one injection
#[derive(Debug, Clone)]
pub struct InjectionRule {
    name: String,
    marker: String,
    snippet: String,
    anchors: Vec<Anchor>,
    exclusions: BTreeSet<String>,
    supersedes: Vec<Supersede>,
}

impl InjectionRule {
    /// Starts building a rule; call [`RuleBuilder::build`] to validate it
    pub fn builder(
        name: impl Into<String>,
        marker: impl Into<String>,
        snippet: impl Into<String>,
    ) -> RuleBuilder {
        RuleBuilder {
            name: name.into(),
            marker: marker.into(),
            snippet: snippet.into(),
            anchors: Vec::new(),
            exclusions: BTreeSet::new(),
            supersedes: Vec::new(),
            pending_error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn supersedes(&self) -> &[Supersede] {
        &self.supersedes
    }

    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.exclusions.contains(file_name)
    }

    pub fn exclusions(&self) -> impl Iterator<Item = &str> {
        self.exclusions.iter().map(String::as_str)
    }

    /// Returns a copy that also excludes `names`
    pub fn with_exclusions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(names.into_iter().map(Into::into));
        self
    }

    /// Snippet to splice for the anchor at `index`
    pub fn snippet_for(&self, index: usize) -> &str {
        self.anchors
            .get(index)
            .and_then(|a| a.snippet.as_deref())
            .unwrap_or(&self.snippet)
    }
}

/// Builder for [`InjectionRule`]
#[derive(Debug)]
pub struct RuleBuilder {
    name: String,
    marker: String,
    snippet: String,
    anchors: Vec<Anchor>,
    exclusions: BTreeSet<String>,
    supersedes: Vec<Supersede>,
    pending_error: Option<RuleError>,
}

impl RuleBuilder {
    /// Adds a literal anchor
    pub fn anchor(mut self, literal: impl Into<String>, side: Side) -> Self {
        self.anchors.push(Anchor::new(Pattern::literal(literal), side));
        self
    }

    /// Adds a regex anchor
    pub fn anchor_regex(mut self, source: &str, side: Side) -> Self {
        match Pattern::regex(&self.name, source) {
            Ok(pattern) => self.anchors.push(Anchor::new(pattern, side)),
            Err(e) => self.record(e),
        }
        self
    }

    /// Adds a fully specified anchor
    pub fn anchor_with(mut self, anchor: Anchor) -> Self {
        self.anchors.push(anchor);
        self
    }

    pub fn exclude(mut self, file_name: impl Into<String>) -> Self {
        self.exclusions.insert(file_name.into());
        self
    }

    /// Retires legacy markup matched by a regex
    pub fn supersede_regex(mut self, source: &str, mode: SupersedeMode) -> Self {
        match Pattern::regex(&self.name, source) {
            Ok(pattern) => self.supersedes.push(Supersede { pattern, mode }),
            Err(e) => self.record(e),
        }
        self
    }

    pub fn supersede(mut self, pattern: Pattern, mode: SupersedeMode) -> Self {
        self.supersedes.push(Supersede { pattern, mode });
        self
    }

    fn record(&mut self, err: RuleError) {
        if self.pending_error.is_none() {
            self.pending_error = Some(err);
        }
    }

    /// Validates and returns the rule
    pub fn build(self) -> Result<InjectionRule, RuleError> {
        if let Some(err) = self.pending_error {
            return Err(err);
        }
        if self.marker.is_empty() {
            return Err(RuleError::EmptyMarker(self.name));
        }
        if self.anchors.is_empty() {
            return Err(RuleError::NoAnchors(self.name));
        }

        let patterns = self
            .anchors
            .iter()
            .map(|a| &a.pattern)
            .chain(self.supersedes.iter().map(|s| &s.pattern));
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(RuleError::EmptyPattern { rule: self.name });
            }
        }

        let snippets = std::iter::once(self.snippet.as_str())
            .chain(self.anchors.iter().filter_map(|a| a.snippet.as_deref()));
        for snippet in snippets {
            if !snippet.contains(&self.marker) {
                return Err(RuleError::MarkerNotInSnippet {
                    rule: self.name,
                    marker: self.marker,
                });
            }
            // A superseded pattern that matches the snippet would strip it on every run
            if let Some(s) = self.supersedes.iter().find(|s| s.pattern.find(snippet).is_some()) {
                return Err(RuleError::SupersedeMatchesSnippet {
                    rule: self.name,
                    pattern: s.pattern.to_string(),
                });
            }
        }

        Ok(InjectionRule {
            name: self.name,
            marker: self.marker,
            snippet: self.snippet,
            anchors: self.anchors,
            exclusions: self.exclusions,
            supersedes: self.supersedes,
        })
    }
}
