//! Date-range and dimension filtering for dated records.
//!
//! Filters always run over the full source slice and return a new vector;
//! the input is never touched.
use crate::error::{MetricsError, Result};
use crate::types::DatedEntity;
use crate::util::{parse_br_date, parse_record_datetime};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter state as the UI keeps it. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRangeFilterSpec {
    #[serde(rename = "dataInicio", default)]
    pub data_inicio: String,
    #[serde(rename = "dataFim", default)]
    pub data_fim: String,
    /// Exact-match dimensions such as `closer` or `funil`.
    #[serde(flatten)]
    pub dimensions: BTreeMap<String, String>,
}

impl DateRangeFilterSpec {
    pub fn with_dimension(mut self, key: &str, value: &str) -> Self {
        self.dimensions.insert(key.to_string(), value.to_string());
        self
    }
}

/// A compiled [`DateRangeFilterSpec`]: bounds parsed once, empty
/// constraints dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRangeFilter {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    dimensions: Vec<(String, String)>,
}

fn parse_bound(raw: &str, h: u32, m: u32, s: u32) -> Result<Option<NaiveDateTime>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_br_date(raw)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .map(Some)
        .ok_or_else(|| MetricsError::InvalidFilterDate(raw.to_string()))
}

impl DateRangeFilter {
    /// Compile a spec. The start bound is midnight of `dataInicio`, the end
    /// bound is `23:59:59` of `dataFim`.
    pub fn from_spec(spec: &DateRangeFilterSpec) -> Result<Self> {
        let start = parse_bound(&spec.data_inicio, 0, 0, 0)?;
        let end = parse_bound(&spec.data_fim, 23, 59, 59)?;
        let dimensions = spec
            .dimensions
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Self {
            start,
            end,
            dimensions,
        })
    }

    pub fn is_unconstrained(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.dimensions.is_empty()
    }

    /// Whether `record` passes every active constraint.
    ///
    /// Records whose `data` is missing or unparseable are only checked
    /// against the dimension filters; date bounds never exclude them.
    pub fn matches<T: DatedEntity>(&self, record: &T) -> bool {
        if let Some(date) = parse_record_datetime(record.data()) {
            if self.start.is_some_and(|start| date < start) {
                return false;
            }
            if self.end.is_some_and(|end| date > end) {
                return false;
            }
        }
        self.dimensions
            .iter()
            .all(|(key, wanted)| record.dimension(key) == Some(wanted.as_str()))
    }

    /// Matching records in input order.
    pub fn apply<T: DatedEntity + Clone>(&self, records: &[T]) -> Vec<T> {
        let kept: Vec<T> = records
            .iter()
            .filter(|r| self.matches(*r))
            .cloned()
            .collect();
        tracing::debug!(total = records.len(), kept = kept.len(), "filtered records");
        kept
    }
}

/// Compile `spec` and apply it to `records`.
pub fn filter_records<T: DatedEntity + Clone>(
    records: &[T],
    spec: &DateRangeFilterSpec,
) -> Result<Vec<T>> {
    Ok(DateRangeFilter::from_spec(spec)?.apply(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DatedRecord;
    use serde_json::json;

    fn sale(data: Option<&str>, closer: &str, funil: &str) -> DatedRecord {
        serde_json::from_value(json!({
            "data": data,
            "closer": closer,
            "funil": funil,
            "valor": 1000,
        }))
        .unwrap()
    }

    fn closers(records: &[DatedRecord]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.dimension("closer").unwrap_or(""))
            .collect()
    }

    #[test]
    fn start_bound_excludes_earlier_records() {
        let records = vec![
            sale(Some("2025-03-05"), "Ana", "Instagram"),
            sale(Some("2025-03-20"), "Bea", "Indicação"),
        ];
        let spec = DateRangeFilterSpec {
            data_inicio: "10/03/2025".into(),
            ..Default::default()
        };
        let out = filter_records(&records, &spec).unwrap();
        assert_eq!(closers(&out), vec!["Bea"]);
    }

    #[test]
    fn end_bound_includes_the_whole_last_day() {
        let records = vec![
            sale(Some("2025-03-20T23:59:59"), "Ana", "Instagram"),
            sale(Some("2025-03-21T00:00:00"), "Bea", "Instagram"),
        ];
        let spec = DateRangeFilterSpec {
            data_fim: "20/03/2025".into(),
            ..Default::default()
        };
        let out = filter_records(&records, &spec).unwrap();
        assert_eq!(closers(&out), vec!["Ana"]);
    }

    #[test]
    fn start_bound_includes_midnight_of_first_day() {
        let records = vec![
            sale(Some("2025-03-09T23:59:59"), "Ana", "Instagram"),
            sale(Some("2025-03-10T00:00:00"), "Bea", "Instagram"),
        ];
        let spec = DateRangeFilterSpec {
            data_inicio: "10/03/2025".into(),
            ..Default::default()
        };
        let out = filter_records(&records, &spec).unwrap();
        assert_eq!(closers(&out), vec!["Bea"]);
    }

    #[test]
    fn offset_timestamps_compare_on_their_local_day() {
        let records = vec![
            sale(Some("2025-03-20T22:00:00-03:00"), "Ana", "Instagram"),
            sale(Some("2025-03-10T00:00:00"), "Bea", "Instagram"),
            sale(Some("2025-03-21T00:30:00-03:00"), "Caio", "Instagram"),
        ];
        let spec = DateRangeFilterSpec {
            data_inicio: "10/03/2025".into(),
            data_fim: "20/03/2025".into(),
            ..Default::default()
        };
        let out = filter_records(&records, &spec).unwrap();
        assert_eq!(closers(&out), vec!["Ana", "Bea"]);
    }

    #[test]
    fn undated_records_skip_date_bounds_but_not_dimensions() {
        let records = vec![
            sale(None, "Ana", "Instagram"),
            sale(None, "Bea", "Instagram"),
            sale(Some("2024-01-01"), "Ana", "Instagram"),
        ];
        let spec = DateRangeFilterSpec {
            data_inicio: "01/03/2025".into(),
            data_fim: "31/03/2025".into(),
            ..Default::default()
        }
        .with_dimension("closer", "Ana");
        let out = filter_records(&records, &spec).unwrap();
        assert_eq!(out, vec![records[0].clone()]);
    }

    #[test]
    fn dimensions_are_exact_and_case_sensitive() {
        let records = vec![
            sale(Some("2025-03-05"), "Ana", "Instagram"),
            sale(Some("2025-03-06"), "ana", "Instagram"),
            sale(Some("2025-03-07"), "Ana", "Google"),
        ];
        let spec = DateRangeFilterSpec::default()
            .with_dimension("closer", "Ana")
            .with_dimension("funil", "Instagram")
            .with_dimension("sdr", "");
        let out = filter_records(&records, &spec).unwrap();
        assert_eq!(out, vec![records[0].clone()]);
    }

    #[test]
    fn missing_dimension_field_does_not_match() {
        let record: DatedRecord =
            serde_json::from_value(json!({ "data": "2025-03-05", "valor": 1 })).unwrap();
        let spec = DateRangeFilterSpec::default().with_dimension("closer", "Ana");
        assert!(filter_records(&[record], &spec).unwrap().is_empty());
    }

    #[test]
    fn empty_spec_is_identity() {
        let records = vec![
            sale(Some("2025-03-05"), "Ana", "Instagram"),
            sale(None, "Bea", "Google"),
        ];
        let filter = DateRangeFilter::from_spec(&DateRangeFilterSpec::default()).unwrap();
        assert!(filter.is_unconstrained());
        assert_eq!(filter.apply(&records), records);
    }

    #[test]
    fn rejects_malformed_bounds() {
        let spec = DateRangeFilterSpec {
            data_inicio: "2025-03-10".into(),
            ..Default::default()
        };
        assert!(matches!(
            DateRangeFilter::from_spec(&spec),
            Err(MetricsError::InvalidFilterDate(raw)) if raw == "2025-03-10"
        ));
    }

    #[test]
    fn spec_deserializes_from_ui_state() {
        let spec: DateRangeFilterSpec = serde_json::from_value(json!({
            "dataInicio": "01/03/2025",
            "dataFim": "",
            "closer": "Ana",
        }))
        .unwrap();
        assert_eq!(spec.data_inicio, "01/03/2025");
        assert_eq!(spec.data_fim, "");
        assert_eq!(spec.dimensions.get("closer").map(String::as_str), Some("Ana"));
    }
}
