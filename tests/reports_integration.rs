use pretty_assertions::assert_eq;
use sales_metrics::filter::{DateRangeFilter, DateRangeFilterSpec};
use sales_metrics::loader::{load_daily, load_dated};
use sales_metrics::{output, reports, MetricsError};
use std::fs;
use tempfile::TempDir;

const DAILY: &str = r#"[
    { "dia": 1, "vendedor": "Ana", "vendas": 2, "ativacoes": 30, "conversoes": 6, "leads": 3 },
    { "dia": 1, "vendedor": "Bea", "vendas": 1, "ativacoes": 20, "conversoes": 4, "leads": 1 },
    { "dia": 8, "vendedor": "Ana", "vendas": 3 },
    { "dia": 30, "vendedor": "Bea", "vendas": 4 },
    { "vendedor": "sem dia", "vendas": 99 }
]"#;

const SALES: &str = r#"[
    { "id": 1, "data": "2025-03-05T09:00:00", "closer": "Ana", "funil": "Instagram", "valor": 1200 },
    { "id": 2, "data": "2025-03-20T18:30:00", "closer": "Bea", "funil": "Indicação", "valor": 3000 },
    { "id": 3, "data": "2025-03-31T23:59:59", "closer": "Ana", "funil": "Instagram", "valor": 800 },
    { "id": 4, "data": null, "closer": "Ana", "funil": "Google", "valor": 500 }
]"#;

fn write_inputs() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("diario.json"), DAILY).unwrap();
    fs::write(dir.path().join("vendas.json"), SALES).unwrap();
    dir
}

#[test]
fn loads_filters_and_summarizes() {
    let dir = write_inputs();
    let (daily, daily_report) = load_daily(dir.path().join("diario.json")).unwrap();
    let (sales, sales_report) = load_dated(dir.path().join("vendas.json")).unwrap();
    assert_eq!(daily_report.parse_errors, 1);
    assert_eq!(daily.len(), 4);
    assert_eq!(sales_report.loaded_rows, 4);

    let spec = DateRangeFilterSpec {
        data_inicio: "10/03/2025".into(),
        data_fim: "31/03/2025".into(),
        ..Default::default()
    }
    .with_dimension("closer", "Ana");
    let filtered = DateRangeFilter::from_spec(&spec).unwrap().apply(&sales);
    let ids: Vec<Option<i64>> = filtered.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![Some(3), Some(4)]);

    let weekly = reports::generate_weekly_report(&daily, "vendas");
    let values: Vec<&str> = weekly.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, vec!["3", "3", "0", "0", "4"]);

    let cumulative = reports::generate_cumulative_report(&daily, "vendas", 30.0, true);
    let points: Vec<(i64, &str, &str)> = cumulative
        .iter()
        .map(|r| (r.day, r.actual.as_str(), r.target.as_str()))
        .collect();
    assert_eq!(points, vec![(1, "3", "1"), (8, "6", "2"), (30, "10", "3")]);

    let summary = reports::generate_summary(&daily, &filtered, "vendas", 20.0);
    assert_eq!(summary.realizado, 10.0);
    assert_eq!(summary.atingimento, 50.0);
    assert_eq!(summary.vendas.total_vendas, 2);
    assert_eq!(summary.vendas.ticket_medio, 650.0);
    assert_eq!(summary.funil.taxa_conversao, 20.0);
}

#[test]
fn exports_reports_to_disk() {
    let dir = write_inputs();
    let (sales, _) = load_dated(dir.path().join("vendas.json")).unwrap();
    let rows = reports::generate_sales_table(&sales);

    let csv_path = dir.path().join("vendas.csv");
    output::write_csv(&csv_path, &rows).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Data,Closer,SDR,Funil,Valor"));
    assert_eq!(lines.next(), Some("05/03/2025,Ana,-,Instagram,R$\u{a0}1.200"));

    let summary = reports::generate_summary(&[], &sales, "vendas", 0.0);
    let json_path = dir.path().join("resumo.json");
    output::write_json(&json_path, &summary).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed["vendas"]["faturamento"], serde_json::json!(5500.0));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_daily(dir.path().join("nao_existe.json")).unwrap_err();
    assert!(matches!(err, MetricsError::Io(_)));
}
