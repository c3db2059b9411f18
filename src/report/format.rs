//! Formatted terminal output for `sfc ingest` and `sfc show`.

use crate::domain::RunOutcome;
use crate::report::DayView;

/// One-line summary of an ingest run.
pub fn format_outcome(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::NoMatch => "No case count on the status page; series unchanged.".to_string(),
        RunOutcome::Inserted { record, .. } => format!(
            "{}: total {}, deaths {} (new day)",
            record.date, record.total, record.deaths
        ),
        RunOutcome::Updated {
            previous, record, ..
        } => format!(
            "{}: total {}, deaths {} (was total {}, deaths {})",
            record.date, record.total, record.deaths, previous.total, previous.deaths
        ),
    }
}

/// Table of cumulative counts and daily change, oldest first.
pub fn format_daily_table(views: &[DayView]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<10}  {:>8}  {:>6}  {:>6}  {:>7}\n",
        "Date", "Total", "Deaths", "New", "Growth"
    ));

    for v in views {
        out.push_str(&format!(
            "{:<10}  {:>8}  {:>6}  {:>6}  {:>6.1}%\n",
            v.day.format("%Y-%m-%d").to_string(),
            v.total,
            v.deaths,
            v.growth,
            v.growth_ratio * 100.0,
        ));
    }

    if views.is_empty() {
        out.push_str("(no records)\n");
    }

    out
}
