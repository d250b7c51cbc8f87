// src/handlers/billing.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser};

// Estas rotas exigem só login (auth_guard, sem o gate de assinatura):
// são justamente o caminho de quem ainda não assinou.

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    // Plano específico; sem ele vale o plano padrão configurado
    #[schema(example = "price_1Sqeuu1j1yZi8xwBMnuy5SBj")]
    pub price_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HostedPageResponse {
    // URL da página hospedada para onde o navegador deve redirecionar
    #[schema(example = "https://checkout.exemplo.com/c/pay/cs_123")]
    pub url: String,
}

// POST /api/billing/checkout
#[utoipa::path(
    post,
    path = "/api/billing/checkout",
    tag = "Assinatura",
    request_body = CheckoutPayload,
    responses(
        (status = 200, description = "Checkout iniciado", body = HostedPageResponse),
        (status = 401, description = "Token inválido ou ausente"),
        (status = 502, description = "Provedor de cobrança indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn start_checkout(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    let url = app_state
        .billing
        .create_checkout_session(&user.email, payload.price_id.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(HostedPageResponse { url })))
}

// POST /api/billing/portal
#[utoipa::path(
    post,
    path = "/api/billing/portal",
    tag = "Assinatura",
    responses(
        (status = 200, description = "Portal de autoatendimento aberto", body = HostedPageResponse),
        (status = 401, description = "Token inválido ou ausente"),
        (status = 502, description = "Provedor de cobrança indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn open_portal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let url = app_state.billing.create_portal_session(&user.email).await?;

    Ok((StatusCode::OK, Json(HostedPageResponse { url })))
}
