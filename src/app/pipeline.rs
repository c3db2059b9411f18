//! The ingest pipeline: one daily data point from the status page into the series.
//!
//! fetch -> extract -> local day key -> load -> upsert -> atomic save
//!
//! Every stage either succeeds or aborts the run; nothing on disk changes
//! unless the final save completes. A page without a case count ends the run
//! early as `RunOutcome::NoMatch` before the series file is touched.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::data::{PageSource, extract_fields};
use crate::domain::day_key::local_day_key;
use crate::domain::series::upsert;
use crate::domain::{IngestConfig, RunOutcome};
use crate::error::IngestError;
use crate::io::{load_series, save_series};

pub struct Ingestor<S> {
    source: S,
    config: IngestConfig,
}

impl<S: PageSource> Ingestor<S> {
    pub fn new(source: S, config: IngestConfig) -> Self {
        Self { source, config }
    }

    /// Run once against the current wall clock.
    pub fn run(&self) -> Result<RunOutcome, IngestError> {
        self.run_at(Utc::now())
    }

    /// Run once as if the current instant were `now`.
    pub fn run_at(&self, now: DateTime<Utc>) -> Result<RunOutcome, IngestError> {
        let config = &self.config;

        // 1) Fetch.
        let text = self.source.fetch_text(&config.source_url)?;

        // 2) Extract.
        let Some(counts) = extract_fields(&text) else {
            warn!(
                url = %config.source_url,
                bytes = text.len(),
                "no case count found on status page; leaving series unchanged"
            );
            return Ok(RunOutcome::NoMatch);
        };
        debug!(total = counts.total, deaths = counts.deaths, "counts extracted");

        // 3) Day key in the configured zone.
        let date = local_day_key(now, config.timezone);

        // 4) Load, 5) merge, 6) persist.
        let mut series = load_series(&config.data_file)?;
        let outcome = upsert(&mut series, &date, counts);
        save_series(&config.data_file, &series)?;

        match &outcome {
            RunOutcome::Inserted { index, record } => info!(
                date = %record.date,
                total = record.total,
                deaths = record.deaths,
                index,
                "recorded new day"
            ),
            RunOutcome::Updated {
                index,
                previous,
                record,
            } => info!(
                date = %record.date,
                total = record.total,
                deaths = record.deaths,
                previous_total = previous.total,
                previous_deaths = previous.deaths,
                index,
                "updated today's record"
            ),
            RunOutcome::NoMatch => {}
        }

        Ok(outcome)
    }
}
