use crate::util::json_number;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tabled::Tabled;

/// A record keyed by calendar day of month (1-based).
pub trait HasDay {
    fn dia(&self) -> i64;
}

/// A record carrying a full timestamp and categorical dimensions
/// (`closer`, `funil`, `sdr`, `vendedor`, ...).
pub trait DatedEntity {
    /// Raw `data` string as sent by the API, if any.
    fn data(&self) -> Option<&str>;
    fn dimension(&self, key: &str) -> Option<&str>;
}

impl<T: HasDay + ?Sized> HasDay for &T {
    fn dia(&self) -> i64 {
        (**self).dia()
    }
}

impl<T: DatedEntity + ?Sized> DatedEntity for &T {
    fn data(&self) -> Option<&str> {
        (**self).data()
    }

    fn dimension(&self, key: &str) -> Option<&str> {
        (**self).dimension(key)
    }
}

/// One row of a daily dashboard endpoint: `{ "dia": 3, "vendas": 2, ... }`.
///
/// Several rows may share a `dia` when the endpoint is broken down by
/// salesperson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub dia: i64,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, Value>,
}

impl DailyRecord {
    /// Numeric value of `name`, 0 when missing or not a number.
    pub fn metric(&self, name: &str) -> f64 {
        self.metrics.get(name).and_then(json_number).unwrap_or(0.0)
    }
}

impl HasDay for DailyRecord {
    fn dia(&self) -> i64 {
        self.dia
    }
}

/// A transaction-like row (a sale, a metric entry) with a full date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl DatedRecord {
    pub fn number(&self, name: &str) -> f64 {
        self.fields.get(name).and_then(json_number).unwrap_or(0.0)
    }
}

impl DatedEntity for DatedRecord {
    fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    fn dimension(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Sum of a metric over one of the five fixed week ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub name: String,
    pub valor: f64,
}

/// Running total against a prorated monthly target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    #[serde(rename = "dia")]
    pub day: i64,
    #[serde(rename = "realizado")]
    pub actual: f64,
    #[serde(rename = "meta")]
    pub target: f64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct WeekRow {
    #[serde(rename = "Semana")]
    #[tabled(rename = "Semana")]
    pub week: String,
    #[serde(rename = "Valor")]
    #[tabled(rename = "Valor")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CumulativeRow {
    #[serde(rename = "Dia")]
    #[tabled(rename = "Dia")]
    pub day: i64,
    #[serde(rename = "Realizado")]
    #[tabled(rename = "Realizado")]
    pub actual: String,
    #[serde(rename = "Meta")]
    #[tabled(rename = "Meta")]
    pub target: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SaleRow {
    #[serde(rename = "Data")]
    #[tabled(rename = "Data")]
    pub date: String,
    #[serde(rename = "Closer")]
    #[tabled(rename = "Closer")]
    pub closer: String,
    #[serde(rename = "SDR")]
    #[tabled(rename = "SDR")]
    pub sdr: String,
    #[serde(rename = "Funil")]
    #[tabled(rename = "Funil")]
    pub funnel: String,
    #[serde(rename = "Valor")]
    #[tabled(rename = "Valor")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelSummary {
    pub ativacoes: f64,
    pub conversoes: f64,
    pub leads: f64,
    /// conversions / activations, in percent
    pub taxa_conversao: f64,
    /// leads / conversions, in percent
    pub taxa_lead: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub total_vendas: usize,
    pub faturamento: f64,
    pub ticket_medio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub metrica: String,
    pub realizado: f64,
    pub meta_mensal: f64,
    pub atingimento: f64,
    pub funil: FunnelSummary,
    pub vendas: SalesSummary,
}
