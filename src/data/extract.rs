//! Best-effort field extraction from the status page.
//!
//! The page is semi-structured HTML whose layout changes without notice, so
//! extraction is two independent text patterns rather than a DOM walk. Keeping
//! it separate from fetch and merge means format drift can be diagnosed by
//! feeding a saved page straight into `extract_fields`.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::FieldCounts;

// ASCII digits only; `\d` would also accept other Unicode digit scripts.
static TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total Positive Cases: ([0-9]+)").unwrap());
static DEATHS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Deaths: ([0-9]+)").unwrap());

/// Extract the cumulative case and death counts from page text.
///
/// Returns `None` when the case count is absent (or does not fit in a `u64`).
/// A missing death count is not an error and reads as `0`.
pub fn extract_fields(text: &str) -> Option<FieldCounts> {
    let total = first_capture(&TOTAL_RE, text)?;
    let deaths = first_capture(&DEATHS_RE, text).unwrap_or(0);
    Some(FieldCounts { total, deaths })
}

fn first_capture(re: &Regex, text: &str) -> Option<u64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}
