use crate::cumulative::{cumulative_by_day, cumulative_by_position};
use crate::format::{format_currency, format_number};
use crate::types::{
    CumulativeRow, DailyRecord, DatedEntity, DatedRecord, FunnelSummary, SaleRow, SalesSummary,
    SummaryStats, WeekRow,
};
use crate::util::parse_record_datetime;
use crate::weekly::weekly_totals;

/// `part / whole` in percent; 0 when `whole` is 0.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

pub fn generate_weekly_report(data: &[DailyRecord], metric: &str) -> Vec<WeekRow> {
    weekly_totals(data, |r| r.metric(metric))
        .into_iter()
        .map(|b| WeekRow {
            week: b.name,
            value: format_number(b.valor),
        })
        .collect()
}

pub fn generate_cumulative_report(
    data: &[DailyRecord],
    metric: &str,
    monthly_target: f64,
    group_by_day: bool,
) -> Vec<CumulativeRow> {
    let points = if group_by_day {
        cumulative_by_day(data, |r| r.metric(metric), monthly_target)
    } else {
        cumulative_by_position(data, |r| r.metric(metric), monthly_target)
    };
    points
        .into_iter()
        .map(|p| CumulativeRow {
            day: p.day,
            actual: format_number(p.actual),
            target: format_number(p.target),
        })
        .collect()
}

pub fn generate_sales_table(sales: &[DatedRecord]) -> Vec<SaleRow> {
    let dimension = |r: &DatedRecord, key: &str| r.dimension(key).unwrap_or("-").to_string();
    sales
        .iter()
        .map(|r| SaleRow {
            date: match parse_record_datetime(r.data()) {
                Some(dt) => dt.format("%d/%m/%Y").to_string(),
                None => r.data().unwrap_or("-").to_string(),
            },
            closer: dimension(r, "closer"),
            sdr: dimension(r, "sdr"),
            funnel: dimension(r, "funil"),
            value: format_currency(r.number("valor")),
        })
        .collect()
}

/// Social-selling funnel: activations, conversions, leads and the step
/// rates between them.
pub fn funnel_summary(data: &[DailyRecord]) -> FunnelSummary {
    let total = |name: &str| data.iter().map(|r| r.metric(name)).sum::<f64>();
    let ativacoes = total("ativacoes");
    let conversoes = total("conversoes");
    let leads = total("leads");
    FunnelSummary {
        ativacoes,
        conversoes,
        leads,
        taxa_conversao: percent_of(conversoes, ativacoes),
        taxa_lead: percent_of(leads, conversoes),
    }
}

pub fn sales_summary(sales: &[DatedRecord]) -> SalesSummary {
    let total_vendas = sales.len();
    let faturamento: f64 = sales.iter().map(|r| r.number("valor")).sum();
    let ticket_medio = if total_vendas == 0 {
        0.0
    } else {
        faturamento / total_vendas as f64
    };
    SalesSummary {
        total_vendas,
        faturamento,
        ticket_medio,
    }
}

pub fn generate_summary(
    daily: &[DailyRecord],
    sales: &[DatedRecord],
    metric: &str,
    monthly_target: f64,
) -> SummaryStats {
    let realizado: f64 = daily.iter().map(|r| r.metric(metric)).sum();
    SummaryStats {
        metrica: metric.to_string(),
        realizado,
        meta_mensal: monthly_target,
        atingimento: percent_of(realizado, monthly_target),
        funil: funnel_summary(daily),
        vendas: sales_summary(sales),
    }
}
