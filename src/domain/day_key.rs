//! Local-day merge keys.
//!
//! A run is bucketed by the calendar day it falls on in a fixed IANA zone, not
//! by the host's zone and not by UTC. The key is the UTC instant of that local
//! midnight, formatted with millisecond precision and a `Z` suffix so it
//! compares byte-for-byte with keys already in the series.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

/// Merge key for the local day containing `now`.
pub fn local_day_key(now: DateTime<Utc>, tz: Tz) -> String {
    local_midnight(now, tz).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// UTC instant of local midnight for the local day containing `now`.
pub fn local_midnight(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local_date = now.with_timezone(&tz).date_naive();
    start_of_local_day(local_date, tz)
}

/// First instant of `date` in `tz`.
///
/// Ambiguous midnights resolve to the earlier instant. Where a DST gap swallows
/// midnight, the first local minute that exists is used instead.
pub fn start_of_local_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight: NaiveDateTime = date.and_hms_opt(0, 0, 0).unwrap_or_default();

    // Gaps are at most a couple of hours, so a day's worth of minutes is plenty.
    for minute in 0..(24 * 60) {
        let candidate = midnight + Duration::minutes(minute);
        if let Some(instant) = tz.from_local_datetime(&candidate).earliest() {
            return instant.with_timezone(&Utc);
        }
    }

    // Unreachable for real zone data; fall back to treating the wall time as UTC.
    Utc.from_utc_datetime(&midnight)
}
