use clap::{Parser, Subcommand};
use sampledb::render::OutputFormat;
use sampledb_common::Variant;
use sampledb_db::reports::ReportKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sampledb")]
#[command(author, version, about = "Sample relational schema, seed batch and canned reports")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides the config file)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the schema, insert the seed batch, and print every report
    Run {
        /// Schema variant: commerce or cinema
        #[arg(long)]
        variant: Option<Variant>,

        /// Empty the variant's tables before seeding
        #[arg(long)]
        reset: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Create the tables of a variant if they do not exist
    Init {
        /// Schema variant: commerce or cinema
        #[arg(long)]
        variant: Option<Variant>,
    },

    /// Insert the seed batch (creating tables first)
    Seed {
        /// Schema variant: commerce or cinema
        #[arg(long)]
        variant: Option<Variant>,

        /// Empty the variant's tables before seeding
        #[arg(long)]
        reset: bool,
    },

    /// Run a single report against the existing data
    Report {
        /// Report name (see `sampledb reports`)
        name: ReportKind,

        /// Firm name for client-purchases
        #[arg(long)]
        client: Option<String>,

        /// Cinema name for cinema-screenings
        #[arg(long)]
        cinema: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the available reports
    Reports {
        /// Only list reports of this variant
        #[arg(long)]
        variant: Option<Variant>,
    },

    /// Show row counts of the known tables
    Tables {
        /// Only show tables of this variant
        #[arg(long)]
        variant: Option<Variant>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        file: Option<PathBuf>,
    },
}
