//! Running totals against a linearly prorated monthly target.
//!
//! Two flavours match the two kinds of daily endpoint:
//! [`cumulative_by_position`] for one row per day already in day order, and
//! [`cumulative_by_day`] for endpoints that return several rows per day
//! (one per salesperson).
use crate::types::{CumulativePoint, HasDay};
use crate::util::or_zero;
use std::collections::BTreeMap;

fn daily_target(monthly_target: f64, days_in_month: i64) -> f64 {
    let monthly_target = or_zero(monthly_target);
    if days_in_month <= 0 || monthly_target == 0.0 {
        return 0.0;
    }
    monthly_target / days_in_month as f64
}

/// One point per record, in input order. The month length is taken to be
/// the number of records, so the last point's target is the full monthly
/// target.
pub fn cumulative_by_position<T, F>(
    records: &[T],
    value: F,
    monthly_target: f64,
) -> Vec<CumulativePoint>
where
    T: HasDay,
    F: Fn(&T) -> f64,
{
    if records.is_empty() {
        return Vec::new();
    }
    let per_day = daily_target(monthly_target, records.len() as i64);
    let mut running = 0.0;
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            running += or_zero(value(r));
            CumulativePoint {
                day: r.dia(),
                actual: running,
                target: per_day * (i + 1) as f64,
            }
        })
        .collect()
}

/// Sum rows per `dia` first, then accumulate over the distinct days in
/// ascending order.
///
/// The month length is the highest day present; the target of the n-th
/// distinct day is `n` daily shares, even when days are missing in between.
pub fn cumulative_by_day<T, F>(records: &[T], value: F, monthly_target: f64) -> Vec<CumulativePoint>
where
    T: HasDay,
    F: Fn(&T) -> f64,
{
    let mut per_day: BTreeMap<i64, f64> = BTreeMap::new();
    for r in records {
        *per_day.entry(r.dia()).or_insert(0.0) += or_zero(value(r));
    }
    let Some(&days_in_month) = per_day.keys().next_back() else {
        return Vec::new();
    };
    if days_in_month < 1 {
        tracing::warn!(days_in_month, "no valid day in input, target left at zero");
    }
    let share = daily_target(monthly_target, days_in_month);
    let mut running = 0.0;
    per_day
        .into_iter()
        .enumerate()
        .map(|(i, (day, sum))| {
            running += sum;
            CumulativePoint {
                day,
                actual: running,
                target: share * (i + 1) as f64,
            }
        })
        .collect()
}
