// src/handlers/quotes.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CompanyScope,
    models::{
        quotes::{PaymentMethod, ProductionStatus, QuoteDetail, QuoteStatus},
        sales::SaleDetail,
    },
    services::items::NewItemPayload,
};

fn default_valid_days() -> i64 {
    30
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotePayload {
    pub client_id: Uuid,

    #[validate(length(min = 1, message = "Adicione pelo menos um item."))]
    pub items: Vec<NewItemPayload>,

    // Validade do orçamento em dias a partir da criação
    #[serde(default = "default_valid_days")]
    #[schema(example = 30)]
    pub valid_days: i64,

    #[schema(value_type = Option<String>, format = Date, example = "2026-08-20")]
    pub delivery_date: Option<NaiveDate>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuotePayload {
    pub client_id: Option<Uuid>,
    // Quando presente, substitui TODOS os itens e recalcula o total
    pub items: Option<Vec<NewItemPayload>>,
    pub valid_days: Option<i64>,
    #[schema(value_type = Option<String>, format = Date)]
    pub delivery_date: Option<NaiveDate>,
    pub notes: Option<String>,
    // Apenas pending/approved/rejected; o resto é derivado
    pub status: Option<QuoteStatus>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPaymentPayload {
    // Aceita "150.50" e "1.500,50" (o formato que o caixa digitar)
    #[validate(length(min = 1, message = "Informe o valor do pagamento."))]
    #[schema(example = "100,00")]
    pub amount: String,

    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertQuotePayload {
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionStatusPayload {
    pub production_status: ProductionStatus,
}

// Resposta das mudanças de status de produção (orçamentos e vendas):
// o link só vem quando a etapa dispara aviso ao cliente.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionStatusResponse {
    pub production_status: ProductionStatus,
    #[schema(example = "https://wa.me/5571999990000?text=...")]
    pub whatsapp_link: Option<String>,
}

// POST /api/quotes
#[utoipa::path(
    post,
    path = "/api/quotes",
    tag = "Orçamentos",
    request_body = CreateQuotePayload,
    responses(
        (status = 201, description = "Orçamento criado", body = QuoteDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente, produto ou serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_quote(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Json(payload): Json<CreateQuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quote = app_state
        .quote_service
        .create_quote(
            &app_state.db_pool,
            scope.0,
            payload.client_id,
            &payload.items,
            payload.valid_days,
            payload.delivery_date,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(quote)))
}

// GET /api/quotes
#[utoipa::path(
    get,
    path = "/api/quotes",
    tag = "Orçamentos",
    responses(
        (status = 200, description = "Orçamentos da empresa, com itens e pagamentos", body = Vec<QuoteDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_quotes(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let quotes = app_state.quote_service.list_quotes(scope.0).await?;
    Ok((StatusCode::OK, Json(quotes)))
}

// GET /api/quotes/{id}
#[utoipa::path(
    get,
    path = "/api/quotes/{id}",
    tag = "Orçamentos",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento completo", body = QuoteDetail),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_quote(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state.quote_service.get_quote(scope.0, id).await?;
    Ok((StatusCode::OK, Json(quote)))
}

// PUT /api/quotes/{id}
#[utoipa::path(
    put,
    path = "/api/quotes/{id}",
    tag = "Orçamentos",
    request_body = UpdateQuotePayload,
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento atualizado", body = QuoteDetail),
        (status = 404, description = "Orçamento não encontrado"),
        (status = 409, description = "Orçamento já convertido")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_quote(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quote = app_state
        .quote_service
        .update_quote(
            &app_state.db_pool,
            scope.0,
            id,
            payload.client_id,
            payload.items.as_deref(),
            payload.valid_days,
            payload.delivery_date,
            payload.notes.as_deref(),
            payload.status,
        )
        .await?;

    Ok((StatusCode::OK, Json(quote)))
}

// DELETE /api/quotes/{id}
#[utoipa::path(
    delete,
    path = "/api/quotes/{id}",
    tag = "Orçamentos",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 204, description = "Orçamento removido (itens e pagamentos juntos)"),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_quote(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.quote_service.delete_quote(scope.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/quotes/{id}/payments
#[utoipa::path(
    post,
    path = "/api/quotes/{id}/payments",
    tag = "Orçamentos",
    request_body = AddPaymentPayload,
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Pagamento registrado; status recalculado", body = QuoteDetail),
        (status = 400, description = "Valor inválido"),
        (status = 404, description = "Orçamento não encontrado"),
        (status = 409, description = "Orçamento já convertido")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_payment(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quote = app_state
        .quote_service
        .add_payment(&app_state.db_pool, scope.0, id, &payload.amount, payload.method)
        .await?;

    Ok((StatusCode::OK, Json(quote)))
}

// DELETE /api/quotes/{id}/payments/{payment_id}
#[utoipa::path(
    delete,
    path = "/api/quotes/{id}/payments/{payment_id}",
    tag = "Orçamentos",
    params(
        ("id" = Uuid, Path, description = "ID do orçamento"),
        ("payment_id" = Uuid, Path, description = "ID do pagamento")
    ),
    responses(
        (status = 200, description = "Pagamento removido; status recalculado", body = QuoteDetail),
        (status = 404, description = "Orçamento ou pagamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_payment(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path((id, payment_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state
        .quote_service
        .remove_payment(&app_state.db_pool, scope.0, id, payment_id)
        .await?;

    Ok((StatusCode::OK, Json(quote)))
}

// POST /api/quotes/{id}/convert
#[utoipa::path(
    post,
    path = "/api/quotes/{id}/convert",
    tag = "Orçamentos",
    request_body = ConvertQuotePayload,
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 201, description = "Venda criada a partir do orçamento", body = SaleDetail),
        (status = 404, description = "Orçamento não encontrado"),
        (status = 409, description = "Orçamento já convertido")
    ),
    security(("api_jwt" = []))
)]
pub async fn convert_quote(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConvertQuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state
        .quote_service
        .convert_to_sale(&app_state.db_pool, scope.0, id, payload.payment_method)
        .await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// PUT /api/quotes/{id}/production-status
#[utoipa::path(
    put,
    path = "/api/quotes/{id}/production-status",
    tag = "Orçamentos",
    request_body = ProductionStatusPayload,
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Status de produção atualizado (e espelhado na venda vinculada)", body = ProductionStatusResponse),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_production_status(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductionStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let change = app_state
        .quote_service
        .update_production_status(&app_state.db_pool, scope.0, id, payload.production_status)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ProductionStatusResponse {
            production_status: change.production_status,
            whatsapp_link: change.whatsapp_link,
        }),
    ))
}

// GET /api/quotes/{id}/whatsapp
#[utoipa::path(
    get,
    path = "/api/quotes/{id}/whatsapp",
    tag = "Orçamentos",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Link click-to-chat com o orçamento e o acompanhamento"),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn whatsapp_link(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let link = app_state.quote_service.announcement_link(scope.0, id).await?;
    Ok((StatusCode::OK, Json(json!({ "whatsappLink": link }))))
}
