//! Command-line parsing for the SF COVID-19 daily ingestor.
//!
//! Every option can also come from the environment (or a `.env` file), which
//! is how a scheduler usually configures the `ingest` run.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    ChartScale, DEFAULT_DATA_FILE, DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TIMEZONE,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sfc", version, about = "Daily SF COVID-19 case/death ingestor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape the status page once and upsert today's record into the series file.
    Ingest(IngestArgs),
    /// Print the series with daily growth and a terminal chart.
    Show(ShowArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct StoreArgs {
    /// Series JSON file.
    #[arg(long, env = "SFC_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// IANA time zone whose calendar days key the series.
    #[arg(long, env = "SFC_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,
}

#[derive(Debug, Args, Clone)]
pub struct IngestArgs {
    /// Status page to scrape.
    #[arg(long, env = "SFC_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub url: String,

    /// Give up on the fetch after this many seconds.
    #[arg(long, env = "SFC_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Show every record instead of only days up to today's month/day.
    #[arg(long)]
    pub all: bool,

    /// Skip the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Y-axis scaling for the chart.
    #[arg(long, value_enum, default_value_t = ChartScale::Linear)]
    pub scale: ChartScale,

    /// Chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
