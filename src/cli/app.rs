//! Main CLI application structure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::batch;
use super::output::Output;
use crate::domain::InjectionRule;
use crate::presets::{PixelId, Preset};
use crate::storage::{GlobalConfig, PageStore, RulesFile};

/// Exit status when `--strict` is set and some page needs attention
pub const EXIT_NEEDS_ATTENTION: u8 = 3;

#[derive(Parser)]
#[command(name = "pagepatch")]
#[command(author, version, about = "Idempotent snippet injection for static HTML pages")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory containing the *.html pages
    #[arg(long, short = 'd', global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Page file name to leave untouched (repeatable)
    #[arg(long, short = 'x', global = true)]
    pub exclude: Vec<String>,

    /// Report what would change without writing
    #[arg(long, short = 'n', global = true)]
    pub dry_run: bool,

    /// Exit with status 3 if any page has no anchor or fails to read/write
    #[arg(long, global = true)]
    pub strict: bool,

    /// Global config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "PAGEPATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the Meta pixel before </head>
    Pixel {
        /// Numeric Meta pixel ID
        pixel_id: PixelId,
    },

    /// Install the Meta parameter builder scripts
    ParamBuilder,

    /// Inject the footer call-to-action
    Cta,

    /// Inject the testimonial footer, replacing existing CTAs
    Testimonials,

    /// Apply rules from a TOML rule file
    Apply {
        /// Path to the rule file
        rules: PathBuf,
    },

    /// List built-in presets
    Presets,
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose);

    output.verbose("pagepatch starting");

    let rules = match cli.command {
        Commands::Presets => {
            list_presets();
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Pixel { pixel_id } => preset_rules(Preset::Pixel(pixel_id), &output)?,
        Commands::ParamBuilder => preset_rules(Preset::ParamBuilder, &output)?,
        Commands::Cta => preset_rules(Preset::Cta, &output)?,
        Commands::Testimonials => preset_rules(Preset::Testimonials, &output)?,
        Commands::Apply { rules } => {
            output.verbose_ctx("apply", &format!("Loading rules from {}", rules.display()));
            RulesFile::load(&rules)?
                .compile()
                .with_context(|| format!("Invalid rule file: {}", rules.display()))?
        }
    };

    let global = GlobalConfig::load(cli.config.as_deref())?;
    let rules = with_exclusions(rules, global.exclude.iter().chain(&cli.exclude));

    for rule in &rules {
        output.verbose_ctx(
            "rules",
            &format!(
                "{}: marker {:?}, {} anchor(s), excluding [{}]",
                rule.name(),
                rule.marker(),
                rule.anchors().len(),
                rule.exclusions().collect::<Vec<_>>().join(", ")
            ),
        );
    }

    let store = PageStore::new(&cli.dir);
    let summary = batch::run(&store, &rules, cli.dry_run, &output)?;

    if (cli.strict || global.strict) && summary.needs_attention() {
        output.verbose("Some pages need attention; exiting non-zero (--strict)");
        return Ok(ExitCode::from(EXIT_NEEDS_ATTENTION));
    }

    output.verbose("Command completed successfully");
    Ok(ExitCode::SUCCESS)
}

fn preset_rules(preset: Preset, output: &Output) -> Result<Vec<InjectionRule>> {
    output.verbose_ctx("preset", &format!("Building rules for {}", preset.name()));
    preset
        .rules()
        .with_context(|| format!("Invalid preset: {}", preset.name()))
}

fn with_exclusions<'a>(
    rules: Vec<InjectionRule>,
    names: impl Iterator<Item = &'a String> + Clone,
) -> Vec<InjectionRule> {
    rules
        .into_iter()
        .map(|rule| rule.with_exclusions(names.clone().cloned()))
        .collect()
}

fn list_presets() {
    println!("{:<16} DESCRIPTION", "PRESET");
    println!("{}", "-".repeat(70));
    for (name, description) in Preset::catalog() {
        println!("{:<16} {}", name, description);
    }
}
