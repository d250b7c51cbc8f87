// src/handlers/tracking.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::tracking::TrackingView};

// GET /api/acompanhar/{id}
//
// Página pública de acompanhamento: sem autenticação. Qualquer id que
// não resolva (inclusive não-UUID) degrada para o 404 de "orçamento não
// encontrado", nunca para um erro bruto.
#[utoipa::path(
    get,
    path = "/api/acompanhar/{id}",
    tag = "Acompanhamento",
    params(("id" = String, Path, description = "ID do orçamento (link enviado ao cliente)")),
    responses(
        (status = 200, description = "Linha do tempo de produção, itens e pagamentos", body = TrackingView),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn track_order(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = Uuid::parse_str(id.trim()).map_err(|_| AppError::QuoteNotFound)?;

    let view = app_state.quote_service.tracking_view(id).await?;
    Ok((StatusCode::OK, Json(view)))
}
