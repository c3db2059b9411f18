//! Shared domain types.
//!
//! `DailyRecord` is the on-disk shape of one day's observation; the rest are
//! in-memory values passed between pipeline stages.

use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_URL: &str = "https://www.sfdph.org/dph/alerts/coronavirus.asp";
pub const DEFAULT_DATA_FILE: &str = "data/sf.json";
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One day's cumulative counts, keyed by the local-midnight instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// ISO-8601 instant of local midnight, e.g. `2021-03-11T08:00:00.000Z`.
    pub date: String,
    pub total: u64,
    /// Files written before deaths were tracked only carry `date` and `total`.
    #[serde(default)]
    pub deaths: u64,
}

impl DailyRecord {
    pub fn new(date: impl Into<String>, counts: FieldCounts) -> Self {
        Self {
            date: date.into(),
            total: counts.total,
            deaths: counts.deaths,
        }
    }
}

/// Counts scraped from one fetch of the status page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCounts {
    pub total: u64,
    pub deaths: u64,
}

/// Everything an ingest run needs besides the page source and the clock.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub source_url: String,
    pub data_file: PathBuf,
    pub timezone: Tz,
    pub fetch_timeout: Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            timezone: chrono_tz::America::Los_Angeles,
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Options for `sfc show`.
#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub data_file: PathBuf,
    pub timezone: Tz,
    /// Skip the day-of-year filter and show the whole series.
    pub all: bool,
    pub plot: bool,
    pub scale: ChartScale,
    pub plot_width: usize,
    pub plot_height: usize,
}

/// Y-axis scaling for the terminal chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChartScale {
    #[default]
    Linear,
    /// Base-2 logarithmic; values below 1 sit on the baseline.
    Log,
}

/// What a single ingest run did to the series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The page carried no case count; nothing was read or written.
    NoMatch,
    /// A new local day was appended at `index`.
    Inserted { index: usize, record: DailyRecord },
    /// The record for the current local day was overwritten in place.
    Updated {
        index: usize,
        previous: DailyRecord,
        record: DailyRecord,
    },
}
