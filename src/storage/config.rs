//! Configuration handling for pagepatch
//!
//! Two TOML files are involved:
//! - rule files, passed to `pagepatch apply <FILE>`
//! - the global config at `~/.config/pagepatch/config.toml` (platform
//!   dependent), holding defaults such as always-excluded pages

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Anchor, InjectionRule, Pattern, RuleError, Side, SupersedeMode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Compiles a pattern given as either `literal` or `regex`, never both
fn compile_pattern(
    rule: &str,
    literal: &Option<String>,
    regex: &Option<String>,
) -> Result<Pattern, ConfigError> {
    match (literal, regex) {
        (Some(lit), None) => Ok(Pattern::literal(lit.clone())),
        (None, Some(re)) => Ok(Pattern::regex(rule, re)?),
        (Some(_), Some(_)) => Err(ConfigError::Invalid(format!(
            "rule '{}': set either 'literal' or 'regex', not both",
            rule
        ))),
        (None, None) => Err(ConfigError::Invalid(format!(
            "rule '{}': pattern needs 'literal' or 'regex'",
            rule
        ))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorSpec {
    pub literal: Option<String>,
    pub regex: Option<String>,

    /// `before` or `after`
    pub side: String,

    /// Overrides the rule snippet when this anchor is used
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupersedeSpec {
    pub literal: Option<String>,
    pub regex: Option<String>,

    /// `remove` (default) or `replace`
    #[serde(default = "default_supersede_mode")]
    pub mode: String,
}

fn default_supersede_mode() -> String {
    "remove".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    pub name: String,
    pub marker: String,
    pub snippet: String,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default, rename = "anchor")]
    pub anchors: Vec<AnchorSpec>,

    #[serde(default, rename = "supersede")]
    pub supersedes: Vec<SupersedeSpec>,
}

impl RuleSpec {
    /// Compiles and validates the rule
    pub fn compile(&self) -> Result<InjectionRule, ConfigError> {
        let mut builder = InjectionRule::builder(&self.name, &self.marker, &self.snippet);

        for spec in &self.anchors {
            let side: Side = spec.side.parse()?;
            let mut anchor = Anchor::new(compile_pattern(&self.name, &spec.literal, &spec.regex)?, side);
            anchor.snippet = spec.snippet.clone();
            builder = builder.anchor_with(anchor);
        }

        for spec in &self.supersedes {
            let mode: SupersedeMode = spec.mode.parse()?;
            builder = builder.supersede(compile_pattern(&self.name, &spec.literal, &spec.regex)?, mode);
        }

        for name in &self.exclude {
            builder = builder.exclude(name);
        }

        Ok(builder.build()?)
    }
}

/// Contents of a rule file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesFile {
    /// Pages excluded from every rule in the file
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleSpec>,
}

impl RulesFile {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to load rule file: {}", path.display()))
    }

    /// Compiles every rule, failing on the first invalid one
    pub fn compile(&self) -> Result<Vec<InjectionRule>, ConfigError> {
        if self.rules.is_empty() {
            return Err(ConfigError::Invalid("rule file defines no [[rule]] entries".to_string()));
        }

        self.rules
            .iter()
            .map(|spec| {
                spec.compile()
                    .map(|rule| rule.with_exclusions(self.exclude.iter().cloned()))
            })
            .collect()
    }
}

/// Global user configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Pages no rule ever touches (e.g. search-console verification files)
    pub exclude: Vec<String>,

    /// Exit non-zero when a page has no anchor or fails to read/write
    pub strict: bool,
}

impl GlobalConfig {
    /// Returns the default global config path
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "pagepatch", "pagepatch")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads from `path`, or from the default location when `None`.
    /// Only the default location may be missing; it then yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse global config: {}", config_path.display()))
    }
}
