//! In-memory upsert of one observation into the series.

use crate::domain::{DailyRecord, FieldCounts, RunOutcome};

/// Merge `counts` for `date` into `series`.
///
/// An existing record with the same `date` string is overwritten in place;
/// otherwise a new record is appended. Other records are never touched or
/// reordered.
pub fn upsert(series: &mut Vec<DailyRecord>, date: &str, counts: FieldCounts) -> RunOutcome {
    match series.iter().position(|r| r.date == date) {
        Some(index) => {
            let slot = &mut series[index];
            let previous = slot.clone();
            slot.total = counts.total;
            slot.deaths = counts.deaths;
            RunOutcome::Updated {
                index,
                previous,
                record: slot.clone(),
            }
        }
        None => {
            let record = DailyRecord::new(date, counts);
            series.push(record.clone());
            RunOutcome::Inserted {
                index: series.len() - 1,
                record,
            }
        }
    }
}
