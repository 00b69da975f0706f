//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, dest::DestCommands, dim::DimCommands,
    export::ExportCommands, import::ImportArgs, init::InitArgs, proj::ProjCommands,
};

#[derive(Parser)]
#[command(name = "pcat")]
#[command(author, version, about = "Project catalog with relational integrity")]
#[command(long_about = "Keeps a catalog of projects classified by type, name, global and precise \
destination and due date. Deleting a classification value removes the projects and destination \
links that reference it.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Catalog data file (default: PCAT_DB, then the config file, then the user data dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose (debug) logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Do not ask for confirmation before deleting
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the catalog data file with the sample catalog
    Init(InitArgs),

    /// Dimension lists: project types, names, global destinations, due dates
    #[command(subcommand)]
    Dim(DimCommands),

    /// Precise destinations and their contacts
    #[command(subcommand)]
    Dest(DestCommands),

    /// Projects
    #[command(subcommand)]
    Proj(ProjCommands),

    /// Export the catalog document or the project table
    #[command(subcommand)]
    Export(ExportCommands),

    /// Replace the whole catalog with a document
    Import(ImportArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// yaml for show, tsv for lists
    #[default]
    Auto,
    /// YAML (show only)
    Yaml,
    /// Aligned columns for the terminal
    Tsv,
    /// JSON
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Markdown table
    Md,
    /// Just ids or values, one per line
    Id,
}

impl OutputFormat {
    /// The `--format` flag, else the configured default, else `Auto`
    pub fn resolve(flag: Option<OutputFormat>, configured: Option<&str>) -> OutputFormat {
        flag.or_else(|| configured.and_then(|s| OutputFormat::from_str(s, true).ok()))
            .unwrap_or_default()
    }
}
