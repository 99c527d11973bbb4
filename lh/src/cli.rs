//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// LearnHub - turn a learning goal into a hierarchical curriculum
#[derive(Parser)]
#[command(name = "lh", about = "Generate hierarchical learning plans with an LLM", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a plan for a learning goal
    Create {
        /// What you want to learn, why, and your current level
        goal: String,

        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,

        /// API key (overrides the configured environment variable)
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,

        /// Persist the plan after generation
        #[arg(short, long)]
        save: bool,

        /// Output format
        #[arg(short, long, default_value = "markdown")]
        format: OutputFormat,
    },

    /// Show a previously saved plan
    Show {
        /// Plan id
        id: String,

        /// Output format
        #[arg(short, long, default_value = "markdown")]
        format: OutputFormat,
    },

    /// List saved plans
    List,
}

/// Output format for plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}
