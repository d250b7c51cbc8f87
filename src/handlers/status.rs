// src/handlers/status.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    // "ok" ou a mensagem de erro da sondagem
    #[schema(example = "ok")]
    pub database: String,
    pub billing_configured: bool,
    #[schema(example = "https://graficaexpress.com.br")]
    pub public_base_url: String,
}

// GET /api/status
//
// Sondagem de conectividade para a tela de status: nunca derruba a
// requisição, devolve o diagnóstico estruturado.
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "Sistema",
    responses((status = 200, description = "Diagnóstico de conectividade", body = SystemStatus)),
    security(("api_jwt" = []))
)]
pub async fn system_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&app_state.db_pool)
        .await
    {
        Ok(_) => "ok".to_string(),
        Err(e) => {
            tracing::error!("Sondagem do banco falhou: {}", e);
            format!("erro: {e}")
        }
    };

    Ok((
        StatusCode::OK,
        Json(SystemStatus {
            database,
            billing_configured: app_state.billing.is_configured(),
            public_base_url: app_state.public_base_url.clone(),
        }),
    ))
}
