// src/services/report_service.rs

// Relatórios e dashboard. Nada fica materializado: a cada chamada as
// coleções da empresa são carregadas e os números recalculados em
// memória, em funções puras.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, QuoteRepository, SaleRepository},
    models::{
        quotes::{Quote, QuoteStatus},
        reports::{DashboardSummary, MonthlyCount, MonthlyPoint, QuotesReport, ReportResponse, SalesReport},
        sales::{Sale, SaleStatus},
    },
};

const MONTH_LABELS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

// Quantos meses entram nas séries dos gráficos
const TRAILING_MONTHS: i32 = 6;

#[derive(Clone)]
pub struct ReportService {
    quote_repo: QuoteRepository,
    sale_repo: SaleRepository,
    client_repo: ClientRepository,
}

impl ReportService {
    pub fn new(
        quote_repo: QuoteRepository,
        sale_repo: SaleRepository,
        client_repo: ClientRepository,
    ) -> Self {
        Self {
            quote_repo,
            sale_repo,
            client_repo,
        }
    }

    pub async fn report(
        &self,
        company_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ReportResponse, AppError> {
        let sales = self.sale_repo.list_headers(company_id).await?;
        let quotes = self.quote_repo.list_headers(company_id).await?;
        let now = Utc::now();

        Ok(ReportResponse {
            sales: sales_report(&sales, start, end),
            quotes: quotes_report(&quotes, start, end),
            monthly_sales: monthly_totals(
                &sales.iter().map(|s| (s.created_at, s.total)).collect::<Vec<_>>(),
                now,
            ),
            monthly_quotes: monthly_totals(
                &quotes.iter().map(|q| (q.created_at, q.total)).collect::<Vec<_>>(),
                now,
            ),
        })
    }

    pub async fn dashboard(&self, company_id: Uuid) -> Result<DashboardSummary, AppError> {
        let clients = self.client_repo.list(company_id).await?;
        let sales = self.sale_repo.list_headers(company_id).await?;
        let quotes = self.quote_repo.list_headers(company_id).await?;
        let now = Utc::now();

        let sales_this_month: Vec<&Sale> = sales
            .iter()
            .filter(|s| same_month(s.created_at, now))
            .collect();

        Ok(DashboardSummary {
            clients: clients.len() as i64,
            pending_quotes: quotes
                .iter()
                .filter(|q| q.status == QuoteStatus::Pending)
                .count() as i64,
            sales_this_month: sales_this_month.len() as i64,
            revenue_this_month: sales_this_month.iter().map(|s| s.total).sum(),
            new_clients_chart: monthly_counts(
                &clients.iter().map(|c| c.created_at).collect::<Vec<_>>(),
                now,
            ),
            sales_chart: monthly_totals(
                &sales.iter().map(|s| (s.created_at, s.total)).collect::<Vec<_>>(),
                now,
            ),
        })
    }
}

// --- Funções puras ---

// [start, end] com end inclusivo até o fim do dia
fn in_range(created_at: DateTime<Utc>, start: NaiveDate, end: NaiveDate) -> bool {
    let date = created_at.date_naive();
    date >= start && date <= end
}

fn same_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn sales_report(sales: &[Sale], start: NaiveDate, end: NaiveDate) -> SalesReport {
    let filtered: Vec<&Sale> = sales
        .iter()
        .filter(|s| in_range(s.created_at, start, end))
        .collect();

    let paid: Vec<&&Sale> = filtered
        .iter()
        .filter(|s| s.status == SaleStatus::Paid)
        .collect();
    let pending: Vec<&&Sale> = filtered
        .iter()
        .filter(|s| s.status == SaleStatus::Pending)
        .collect();

    SalesReport {
        count: filtered.len(),
        total: filtered.iter().map(|s| s.total).sum(),
        paid_count: paid.len(),
        paid_total: paid.iter().map(|s| s.total).sum(),
        pending_count: pending.len(),
        pending_total: pending.iter().map(|s| s.total).sum(),
    }
}

pub fn quotes_report(quotes: &[Quote], start: NaiveDate, end: NaiveDate) -> QuotesReport {
    let filtered: Vec<&Quote> = quotes
        .iter()
        .filter(|q| in_range(q.created_at, start, end))
        .collect();

    let count_with = |status: QuoteStatus| filtered.iter().filter(|q| q.status == status).count();
    let converted_count = count_with(QuoteStatus::Converted);

    QuotesReport {
        count: filtered.len(),
        total: filtered.iter().map(|q| q.total).sum(),
        pending_count: count_with(QuoteStatus::Pending),
        approved_count: count_with(QuoteStatus::Approved),
        rejected_count: count_with(QuoteStatus::Rejected),
        conversion_rate: conversion_rate(converted_count, filtered.len()),
        converted_count,
    }
}

// Percentual com uma casa decimal; "0" quando não há denominador
pub fn conversion_rate(converted: usize, total: usize) -> String {
    if total == 0 {
        return "0".to_string();
    }
    format!("{:.1}", (converted as f64 / total as f64) * 100.0)
}

// (ano, mês) dos últimos N meses terminando no mês atual, do mais antigo
// para o mais novo
fn trailing_months(now: DateTime<Utc>) -> Vec<(i32, u32)> {
    let mut months = Vec::with_capacity(TRAILING_MONTHS as usize);
    for offset in (0..TRAILING_MONTHS).rev() {
        let mut year = now.year();
        let mut month = now.month() as i32 - offset;
        while month < 1 {
            month += 12;
            year -= 1;
        }
        months.push((year, month as u32));
    }
    months
}

fn month_label(year: i32, month: u32) -> String {
    format!(
        "{}/{:02}",
        MONTH_LABELS[(month - 1) as usize],
        year.rem_euclid(100)
    )
}

// Sempre exatamente 6 pontos, meses sem registro valem 0
pub fn monthly_totals(records: &[(DateTime<Utc>, Decimal)], now: DateTime<Utc>) -> Vec<MonthlyPoint> {
    trailing_months(now)
        .into_iter()
        .map(|(year, month)| MonthlyPoint {
            label: month_label(year, month),
            value: records
                .iter()
                .filter(|(at, _)| at.year() == year && at.month() == month)
                .map(|(_, total)| *total)
                .sum(),
        })
        .collect()
}

pub fn monthly_counts(dates: &[DateTime<Utc>], now: DateTime<Utc>) -> Vec<MonthlyCount> {
    trailing_months(now)
        .into_iter()
        .map(|(year, month)| MonthlyCount {
            label: month_label(year, month),
            value: dates
                .iter()
                .filter(|at| at.year() == year && at.month() == month)
                .count() as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn quote(status: QuoteStatus, total: Decimal, created_at: DateTime<Utc>) -> Quote {
        Quote {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            client_name: "Maria".to_string(),
            client_phone: None,
            total,
            status,
            production_status: crate::models::quotes::ProductionStatus::WaitingApproval,
            valid_until: created_at,
            delivery_date: None,
            notes: None,
            created_at,
        }
    }

    fn sale(status: SaleStatus, total: Decimal, created_at: DateTime<Utc>) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            client_name: "Maria".to_string(),
            client_phone: None,
            quote_id: None,
            total,
            payment_method: crate::models::quotes::PaymentMethod::Pix,
            status,
            production_status: None,
            delivery_date: None,
            created_at,
        }
    }

    #[test]
    fn taxa_de_conversao_com_uma_casa() {
        // 4 orçamentos, 1 convertido
        assert_eq!(conversion_rate(1, 4), "25.0");
        assert_eq!(conversion_rate(1, 3), "33.3");
        assert_eq!(conversion_rate(0, 10), "0.0");
    }

    #[test]
    fn taxa_de_conversao_sem_orcamentos() {
        assert_eq!(conversion_rate(0, 0), "0");
    }

    #[test]
    fn relatorio_de_orcamentos_no_periodo() {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 7, 31).unwrap();

        let quotes = vec![
            quote(QuoteStatus::Pending, dec!(100), at(2026, 7, 5)),
            quote(QuoteStatus::Converted, dec!(200), at(2026, 7, 10)),
            quote(QuoteStatus::Approved, dec!(300), at(2026, 7, 31)), // último dia conta
            quote(QuoteStatus::Rejected, dec!(50), at(2026, 7, 20)),
            quote(QuoteStatus::Pending, dec!(999), at(2026, 8, 1)), // fora do período
        ];

        let report = quotes_report(&quotes, start, end);
        assert_eq!(report.count, 4);
        assert_eq!(report.total, dec!(650));
        assert_eq!(report.pending_count, 1);
        assert_eq!(report.converted_count, 1);
        assert_eq!(report.conversion_rate, "25.0");
    }

    #[test]
    fn relatorio_de_vendas_separa_pagas_e_pendentes() {
        let start = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();

        let sales = vec![
            sale(SaleStatus::Paid, dec!(150), at(2026, 8, 2)),
            sale(SaleStatus::Pending, dec!(80), at(2026, 8, 3)),
            sale(SaleStatus::Cancelled, dec!(70), at(2026, 8, 4)),
        ];

        let report = sales_report(&sales, start, end);
        assert_eq!(report.count, 3);
        assert_eq!(report.total, dec!(300));
        assert_eq!(report.paid_count, 1);
        assert_eq!(report.paid_total, dec!(150));
        assert_eq!(report.pending_count, 1);
        assert_eq!(report.pending_total, dec!(80));
    }

    #[test]
    fn serie_mensal_tem_sempre_seis_pontos_ordenados() {
        let now = at(2026, 8, 5);
        // Só há registro em junho; o resto zera
        let records = vec![(at(2026, 6, 10), dec!(120)), (at(2026, 6, 20), dec!(30))];

        let series = monthly_totals(&records, now);
        assert_eq!(series.len(), 6);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["mar/26", "abr/26", "mai/26", "jun/26", "jul/26", "ago/26"]);

        assert_eq!(series[3].value, dec!(150)); // jun
        assert_eq!(series[0].value, dec!(0));
        assert_eq!(series[5].value, dec!(0));
    }

    #[test]
    fn serie_mensal_cruza_a_virada_de_ano() {
        let now = at(2026, 1, 15);
        let series = monthly_totals(&[], now);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["ago/25", "set/25", "out/25", "nov/25", "dez/25", "jan/26"]);
    }

    #[test]
    fn contagem_mensal_de_clientes() {
        let now = at(2026, 8, 5);
        let dates = vec![at(2026, 8, 1), at(2026, 8, 2), at(2026, 5, 9)];

        let series = monthly_counts(&dates, now);
        assert_eq!(series.len(), 6);
        assert_eq!(series[5].value, 2); // ago/26
        assert_eq!(series[2].value, 1); // mai/26
        assert_eq!(series[0].value, 0);
    }
}
