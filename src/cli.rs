//! CLI interface for the ATS analyzer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ats-analyzer")]
#[command(about = "Heuristic ATS compatibility analysis for resumes")]
#[command(long_about = "Score a resume for applicant tracking system compatibility using keyword, format, content and readability heuristics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Target role, e.g. "software engineer"
        #[arg(long)]
        role: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show every recommendation and the section scores
        #[arg(short, long)]
        detailed: bool,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// List built-in target roles
    Roles,

    /// Show the target keywords that would be used for an analysis
    Keywords {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Target role
        #[arg(long)]
        role: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "analysis.found_keywords_limit")
        key: String,

        /// Configuration value
        value: String,
    },
}
