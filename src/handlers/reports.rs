// src/handlers/reports.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CompanyScope,
    models::reports::{DashboardSummary, ReportResponse},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    // Sem filtro informado, o período é o mês corrente
    #[param(example = "2026-08-01")]
    pub start: Option<NaiveDate>,
    #[param(example = "2026-08-31")]
    pub end: Option<NaiveDate>,
}

// Primeiro e último dia do mês corrente
fn current_month_bounds() -> (NaiveDate, NaiveDate) {
    let today = Utc::now().date_naive();
    let start = today.with_day(1).expect("dia 1 sempre existe");
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    }
    .expect("primeiro dia do mês seguinte sempre existe");
    (start, next_month - Duration::days(1))
}

// GET /api/reports
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Relatórios",
    params(ReportQuery),
    responses(
        (status = 200, description = "Estatísticas de vendas e orçamentos no período + séries mensais", body = ReportResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (default_start, default_end) = current_month_bounds();
    let start = query.start.unwrap_or(default_start);
    let end = query.end.unwrap_or(default_end);

    let report = app_state.report_service.report(scope.0, start, end).await?;
    Ok((StatusCode::OK, Json(report)))
}

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Relatórios",
    responses(
        (status = 200, description = "Números do painel inicial", body = DashboardSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.report_service.dashboard(scope.0).await?;
    Ok((StatusCode::OK, Json(summary)))
}
