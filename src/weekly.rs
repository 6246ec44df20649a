//! Weekly bucketing of per-day records.
//!
//! The month is always split into the same five ranges, whatever its length:
//! `S1` = days 1-7, `S2` = 8-14, `S3` = 15-21, `S4` = 22-28, `S5` = 29+.
use crate::error::{MetricsError, Result};
use crate::types::{HasDay, WeekBucket};
use crate::util::or_zero;

pub const WEEK_LABELS: [&str; 5] = ["S1", "S2", "S3", "S4", "S5"];

fn bucket_index(dia: i64) -> usize {
    // Same condition chain as the dashboard: anything that is not 1..=28
    // (including 0 and negatives) lands in the last bucket.
    if (1..=7).contains(&dia) {
        0
    } else if (8..=14).contains(&dia) {
        1
    } else if (15..=21).contains(&dia) {
        2
    } else if (22..=28).contains(&dia) {
        3
    } else {
        4
    }
}

/// Sum `value` per week bucket. Always returns five entries in `S1..S5`
/// order; empty buckets carry `0`.
///
/// Days below 1 are summed into `S5` and logged.
pub fn weekly_totals<T, F>(records: &[T], value: F) -> Vec<WeekBucket>
where
    T: HasDay,
    F: Fn(&T) -> f64,
{
    let mut sums = [0.0f64; 5];
    for r in records {
        let dia = r.dia();
        if dia < 1 {
            tracing::warn!(dia, "day out of range, counted in the last week");
        }
        sums[bucket_index(dia)] += or_zero(value(r));
    }
    WEEK_LABELS
        .iter()
        .zip(sums)
        .map(|(name, valor)| WeekBucket {
            name: (*name).to_string(),
            valor,
        })
        .collect()
}

/// Like [`weekly_totals`] but rejects any record with `dia < 1`.
pub fn weekly_totals_checked<T, F>(records: &[T], value: F) -> Result<Vec<WeekBucket>>
where
    T: HasDay,
    F: Fn(&T) -> f64,
{
    if let Some(bad) = records.iter().map(|r| r.dia()).find(|d| *d < 1) {
        return Err(MetricsError::DayOutOfRange(bad));
    }
    Ok(weekly_totals(records, value))
}
