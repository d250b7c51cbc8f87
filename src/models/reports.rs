// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Um ponto da série mensal (sempre 6 pontos, do mês mais antigo ao atual)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    // Ex: "ago/25"
    #[schema(example = "ago/25")]
    pub label: String,
    #[schema(example = "1520.00")]
    pub value: Decimal,
}

// Contagem mensal (gráfico de novos clientes)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    #[schema(example = "ago/25")]
    pub label: String,
    #[schema(example = 4)]
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub count: usize,
    pub total: Decimal,
    pub paid_count: usize,
    pub paid_total: Decimal,
    pub pending_count: usize,
    pub pending_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotesReport {
    pub count: usize,
    pub total: Decimal,
    pub pending_count: usize,
    pub approved_count: usize,
    pub converted_count: usize,
    pub rejected_count: usize,
    // Percentual com uma casa decimal, "0" quando não há orçamentos no período
    #[schema(example = "25.0")]
    pub conversion_rate: String,
}

// Resposta de GET /api/reports
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub sales: SalesReport,
    pub quotes: QuotesReport,
    pub monthly_sales: Vec<MonthlyPoint>,
    pub monthly_quotes: Vec<MonthlyPoint>,
}

// Resposta de GET /api/dashboard
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub clients: i64,
    pub pending_quotes: i64,
    pub sales_this_month: i64,
    pub revenue_this_month: Decimal,
    pub new_clients_chart: Vec<MonthlyCount>,
    pub sales_chart: Vec<MonthlyPoint>,
}
