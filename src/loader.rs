use crate::error::Result;
use crate::types::{DailyRecord, DatedRecord};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

/// Parse a JSON array, keeping the rows that deserialize as `T` and counting
/// the rest.
pub fn parse_rows<T: DeserializeOwned>(json: &str) -> Result<(Vec<T>, LoadReport)> {
    let raw: Vec<Value> = serde_json::from_str(json)?;
    let total_rows = raw.len();
    let mut parse_errors = 0usize;
    let mut rows = Vec::with_capacity(total_rows);

    for (idx, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(row) => rows.push(row),
            Err(e) => {
                tracing::warn!(row = idx, error = %e, "skipping malformed row");
                parse_errors += 1;
            }
        }
    }

    let report = LoadReport {
        total_rows,
        loaded_rows: rows.len(),
        parse_errors,
    };
    Ok((rows, report))
}

fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<(Vec<T>, LoadReport)> {
    let text = std::fs::read_to_string(path)?;
    let (rows, report) = parse_rows(&text)?;
    tracing::debug!(path = %path.display(), ?report, "loaded rows");
    Ok((rows, report))
}

/// Rows of a daily dashboard export (`[{ "dia": 1, ... }]`).
pub fn load_daily(path: impl AsRef<Path>) -> Result<(Vec<DailyRecord>, LoadReport)> {
    load_rows(path.as_ref())
}

/// Rows of a detailed record export (`[{ "data": "...", "closer": ... }]`).
pub fn load_dated(path: impl AsRef<Path>) -> Result<(Vec<DatedRecord>, LoadReport)> {
    load_rows(path.as_ref())
}
