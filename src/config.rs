// Runtime settings for the report binary, read from the environment
// (optionally seeded by a `.env` file).
use crate::filter::DateRangeFilterSpec;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub daily_file: PathBuf,
    pub sales_file: PathBuf,
    pub output_dir: PathBuf,
    /// Metric summed by the weekly and cumulative reports.
    pub metric: String,
    pub monthly_target: f64,
    /// Use the per-day grouping projection (several rows per day).
    pub group_by_day: bool,
    pub filter: DateRangeFilterSpec,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            daily_file: PathBuf::from("metricas_diarias.json"),
            sales_file: PathBuf::from("vendas.json"),
            output_dir: PathBuf::from("."),
            metric: "vendas".to_string(),
            monthly_target: 0.0,
            group_by_day: false,
            filter: DateRangeFilterSpec::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).unwrap_or_default();

        let filter = DateRangeFilterSpec {
            data_inicio: text("METRICS_DATE_FROM"),
            data_fim: text("METRICS_DATE_TO"),
            ..Default::default()
        }
        .with_dimension("closer", &text("METRICS_CLOSER"))
        .with_dimension("funil", &text("METRICS_FUNNEL"));

        Self {
            daily_file: lookup("METRICS_DAILY_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.daily_file),
            sales_file: lookup("METRICS_SALES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.sales_file),
            output_dir: lookup("METRICS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            metric: lookup("METRICS_FIELD").unwrap_or(defaults.metric),
            monthly_target: parsed(&lookup, "METRICS_MONTHLY_TARGET", defaults.monthly_target),
            group_by_day: parsed(&lookup, "METRICS_GROUP_BY_DAY", defaults.group_by_day),
            filter,
        }
    }
}

fn parsed<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparseable setting, using default");
            default
        }),
    }
}
