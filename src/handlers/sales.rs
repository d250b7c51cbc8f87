// src/handlers/sales.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::quotes::{ProductionStatusPayload, ProductionStatusResponse},
    middleware::auth::CompanyScope,
    models::{
        quotes::PaymentMethod,
        sales::{SaleDetail, SaleStatus},
    },
    services::items::NewItemPayload,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub client_id: Uuid,

    pub payment_method: PaymentMethod,

    #[validate(length(min = 1, message = "Adicione pelo menos um item."))]
    pub items: Vec<NewItemPayload>,

    #[schema(value_type = Option<String>, format = Date)]
    pub delivery_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalePayload {
    // Marcar como paga/cancelada é o caso comum
    pub status: Option<SaleStatus>,
    pub payment_method: Option<PaymentMethod>,
    #[schema(value_type = Option<String>, format = Date)]
    pub delivery_date: Option<NaiveDate>,
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Vendas",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada", body = SaleDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente, produto ou serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let sale = app_state
        .sale_service
        .create_sale(
            &app_state.db_pool,
            scope.0,
            payload.client_id,
            &payload.items,
            payload.payment_method,
            payload.delivery_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Vendas",
    responses(
        (status = 200, description = "Vendas da empresa, com itens", body = Vec<SaleDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.sale_service.list_sales(scope.0).await?;
    Ok((StatusCode::OK, Json(sales)))
}

// PUT /api/sales/{id}
#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    tag = "Vendas",
    request_body = UpdateSalePayload,
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda atualizada", body = SaleDetail),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state
        .sale_service
        .update_sale(
            &app_state.db_pool,
            scope.0,
            id,
            payload.status,
            payload.payment_method,
            payload.delivery_date,
        )
        .await?;

    Ok((StatusCode::OK, Json(sale)))
}

// DELETE /api/sales/{id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Vendas",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 204, description = "Venda removida"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.sale_service.delete_sale(scope.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// PUT /api/sales/{id}/production-status
#[utoipa::path(
    put,
    path = "/api/sales/{id}/production-status",
    tag = "Vendas",
    request_body = ProductionStatusPayload,
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Status de produção atualizado (e espelhado no orçamento de origem)", body = ProductionStatusResponse),
        (status = 404, description = "Venda não encontrada")
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
        .sale_service
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
