// Entry point and interactive menu.
//
// - Option [1] loads the daily metrics and sales exports, printing
//   diagnostics.
// - Option [2] builds the weekly, cumulative and sales reports plus a JSON
//   summary, exporting each to the output directory.
// - After generating reports, the user can go back to the menu or exit.
use once_cell::sync::Lazy;
use sales_metrics::config::AppConfig;
use sales_metrics::filter::DateRangeFilter;
use sales_metrics::format::{format_currency, format_int, format_number, format_percent};
use sales_metrics::loader::{self, LoadReport};
use sales_metrics::types::{DailyRecord, DatedRecord};
use sales_metrics::{output, reports};
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};
use tracing_subscriber::EnvFilter;

// Loaded once, reported on as many times as the user wants.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        daily: None,
        sales: None,
    })
});

struct AppState {
    daily: Option<Vec<DailyRecord>>,
    sales: Option<Vec<DatedRecord>>,
}

fn state() -> MutexGuard<'static, AppState> {
    APP_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Print `prompt` and read one trimmed line; `None` once stdin is closed.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) => None,
        Ok(_) => Some(buf.trim().to_string()),
        Err(e) => {
            tracing::error!("failed to read stdin: {e}");
            None
        }
    }
}

fn read_choice() -> Option<String> {
    read_line("Escolha: ")
}

/// Returns `true` if the user chose `S`, `false` for `N` or end of input.
fn prompt_back_to_menu() -> bool {
    loop {
        let Some(resp) = read_line("Voltar ao menu? (S/N): ") else {
            return false;
        };
        match resp.to_uppercase().as_str() {
            "S" => return true,
            "N" => return false,
            _ => println!("Opção inválida. Digite S ou N."),
        }
    }
}

fn print_load_report(label: &str, report: &LoadReport) {
    println!(
        "{}: {} linhas lidas, {} carregadas.",
        label,
        format_int(report.total_rows),
        format_int(report.loaded_rows)
    );
    if report.parse_errors > 0 {
        println!(
            "Aviso: {} linhas ignoradas por erro de formato.",
            format_int(report.parse_errors)
        );
    }
}

fn handle_load(config: &AppConfig) {
    match loader::load_daily(&config.daily_file) {
        Ok((rows, report)) => {
            print_load_report("Métricas diárias", &report);
            state().daily = Some(rows);
        }
        Err(e) => {
            tracing::error!(file = %config.daily_file.display(), "failed to load: {e}");
            eprintln!("Falha ao carregar {}: {}", config.daily_file.display(), e);
        }
    }
    match loader::load_dated(&config.sales_file) {
        Ok((rows, report)) => {
            print_load_report("Vendas", &report);
            state().sales = Some(rows);
        }
        Err(e) => {
            tracing::error!(file = %config.sales_file.display(), "failed to load: {e}");
            eprintln!("Falha ao carregar {}: {}", config.sales_file.display(), e);
        }
    }
    println!();
}

fn export<T: serde::Serialize>(config: &AppConfig, file: &str, rows: &[T]) {
    let path = config.output_dir.join(file);
    if let Err(e) = output::write_csv(&path, rows) {
        tracing::error!(file = %path.display(), "write failed: {e}");
        eprintln!("Erro de escrita: {}", e);
    } else {
        println!("(Tabela completa exportada para {})\n", path.display());
    }
}

fn handle_generate_reports(config: &AppConfig) {
    let (daily, sales) = {
        let state = state();
        (state.daily.clone(), state.sales.clone())
    };
    let Some(daily) = daily else {
        println!("Erro: nenhum dado carregado. Carregue os arquivos primeiro (opção 1).\n");
        return;
    };
    let sales = sales.unwrap_or_default();

    let filter = match DateRangeFilter::from_spec(&config.filter) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Filtro inválido: {}\n", e);
            return;
        }
    };
    let filtered_sales = filter.apply(&sales);

    println!("Relatório 1: {} por semana\n", config.metric);
    let r1 = reports::generate_weekly_report(&daily, &config.metric);
    output::preview_table_rows(&r1, 5);
    export(config, "relatorio_semanal.csv", &r1);

    println!("Relatório 2: {} acumulado x meta\n", config.metric);
    let r2 = reports::generate_cumulative_report(
        &daily,
        &config.metric,
        config.monthly_target,
        config.group_by_day,
    );
    output::preview_table_rows(&r2, 5);
    export(config, "relatorio_acumulado.csv", &r2);

    println!(
        "Relatório 3: vendas ({} de {} após filtro)\n",
        format_int(filtered_sales.len()),
        format_int(sales.len())
    );
    let r3 = reports::generate_sales_table(&filtered_sales);
    output::preview_table_rows(&r3, 5);
    export(config, "relatorio_vendas.csv", &r3);

    let summary = reports::generate_summary(
        &daily,
        &filtered_sales,
        &config.metric,
        config.monthly_target,
    );
    let summary_path = config.output_dir.join("resumo.json");
    if let Err(e) = output::write_json(&summary_path, &summary) {
        tracing::error!(file = %summary_path.display(), "write failed: {e}");
        eprintln!("Erro de escrita: {}", e);
    }
    println!("Resumo ({}):", summary_path.display());
    println!(
        "  {}: {} de {} ({})",
        summary.metrica,
        format_number(summary.realizado),
        format_number(summary.meta_mensal),
        format_percent(summary.atingimento)
    );
    println!(
        "  Faturamento: {} em {} vendas, ticket médio {}",
        format_currency(summary.vendas.faturamento),
        format_int(summary.vendas.total_vendas),
        format_currency(summary.vendas.ticket_medio)
    );
    println!(
        "  Funil: {} ativações, {} conversões ({}), {} leads ({})\n",
        format_number(summary.funil.ativacoes),
        format_number(summary.funil.conversoes),
        format_percent(summary.funil.taxa_conversao),
        format_number(summary.funil.leads),
        format_percent(summary.funil.taxa_lead)
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env();
    tracing::debug!(?config, "configuration loaded");

    loop {
        println!("Painel comercial:");
        println!("[1] Carregar arquivos");
        println!("[2] Gerar relatórios\n");
        let Some(choice) = read_choice() else {
            println!("\nEncerrando.");
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&config),
            "2" => {
                println!();
                handle_generate_reports(&config);
                if !prompt_back_to_menu() {
                    println!("Encerrando.");
                    break;
                }
            }
            _ => println!("Opção inválida. Digite 1 ou 2.\n"),
        }
    }
}
