//! Read-side derivations over the persisted series.
//!
//! The series stores cumulative counts only. For display we derive the daily
//! change (`growth`) and its ratio to the previous total, and optionally trim
//! the series to calendar days on or before today's month/day so successive
//! years line up.

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;

use crate::domain::DailyRecord;

pub mod format;

pub use format::*;

/// One record prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    /// Local calendar day of the record's key.
    pub day: NaiveDate,
    pub total: u64,
    pub deaths: u64,
    /// `total - previous total`; the first entry's growth is its total.
    pub growth: i64,
    /// `growth / previous total`, or `0.0` without a usable previous total.
    pub growth_ratio: f64,
}

/// Derive per-day growth in series order.
///
/// Fails on the first record whose `date` is not an RFC 3339 instant or whose
/// `total` does not fit in an `i64`.
pub fn derive_daily(series: &[DailyRecord], tz: Tz) -> Result<Vec<DayView>, String> {
    let mut out = Vec::with_capacity(series.len());
    let mut prev_total: Option<i64> = None;

    for (idx, rec) in series.iter().enumerate() {
        let instant = DateTime::parse_from_rfc3339(&rec.date)
            .map_err(|e| format!("record {idx}: invalid date '{}': {e}", rec.date))?;
        let day = instant.with_timezone(&tz).date_naive();

        let total = i64::try_from(rec.total)
            .map_err(|_| format!("record {idx}: total {} out of range", rec.total))?;
        let growth = total
            .checked_sub(prev_total.unwrap_or(0))
            .ok_or_else(|| format!("record {idx}: growth from total {} overflows", rec.total))?;
        let growth_ratio = match prev_total {
            Some(p) if p > 0 => growth as f64 / p as f64,
            _ => 0.0,
        };

        out.push(DayView {
            day,
            total: rec.total,
            deaths: rec.deaths,
            growth,
            growth_ratio,
        });
        prev_total = Some(total);
    }

    Ok(out)
}

/// Keep days whose month/day is on or before `today`'s month/day, in any year.
///
/// Growth is derived before filtering, so the first kept day still reports its
/// change against the (possibly dropped) day before it.
pub fn through_day_of_year(views: Vec<DayView>, today: NaiveDate) -> Vec<DayView> {
    let cutoff = (today.month(), today.day());
    views
        .into_iter()
        .filter(|v| (v.day.month(), v.day.day()) <= cutoff)
        .collect()
}
