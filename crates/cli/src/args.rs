//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// glossite: static bilingual site generator with a cross-referenced glossary
#[derive(Parser, Debug)]
#[command(name = "glossite")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every language and write the pages
    Build(BuildArgs),

    /// Validate the site document
    Check(CheckArgs),

    /// Show the glossary tag index
    Tags(TagsArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Override site document path
    #[arg(long)]
    pub site: Option<PathBuf>,

    /// Override output directory
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Only build these languages (comma separated)
    #[arg(long = "lang", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Render without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Output the build report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Override site document path
    #[arg(long)]
    pub site: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Override site document path
    #[arg(long)]
    pub site: Option<PathBuf>,

    /// Language to resolve labels in (defaults to the site's first language)
    #[arg(long)]
    pub lang: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./glossite.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}
