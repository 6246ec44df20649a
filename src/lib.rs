//! Client-side metrics for the commercial dashboard: rounding and pt-BR
//! formatting, date-range filtering, weekly bucketing and cumulative
//! projections over already-fetched JSON.
pub mod config;
pub mod cumulative;
pub mod error;
pub mod filter;
pub mod format;
pub mod loader;
pub mod output;
pub mod reports;
pub mod types;
pub mod util;
pub mod weekly;

pub use cumulative::{cumulative_by_day, cumulative_by_position};
pub use error::{MetricsError, Result};
pub use filter::{filter_records, DateRangeFilter, DateRangeFilterSpec};
pub use format::{custom_round, format_currency, format_number, format_percent};
pub use types::{CumulativePoint, DailyRecord, DatedEntity, DatedRecord, HasDay, WeekBucket};
pub use weekly::{weekly_totals, weekly_totals_checked};
