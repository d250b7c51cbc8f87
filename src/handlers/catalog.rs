// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CompanyScope,
    models::catalog::{MeasurementUnit, Product, Service},
};

// =============================================================================
//  PRODUTOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Lona 440g")]
    pub name: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    #[schema(example = "Comunicação Visual")]
    pub category: String,

    #[schema(example = "55.00")]
    pub price: Decimal,

    pub measurement_unit: MeasurementUnit,

    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub measurement_unit: Option<MeasurementUnit>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Catálogo",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .create_product(
            scope.0,
            &payload.name,
            &payload.category,
            payload.price,
            payload.measurement_unit,
            payload.image_url.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catálogo",
    responses((status = 200, description = "Produtos da empresa", body = Vec<Product>)),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.catalog_service.list_products(scope.0).await?;
    Ok((StatusCode::OK, Json(products)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Catálogo",
    request_body = UpdateProductPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .update_product(
            scope.0,
            id,
            payload.name.as_deref(),
            payload.category.as_deref(),
            payload.price,
            payload.measurement_unit,
            payload.image_url.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_product(scope.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  SERVIÇOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServicePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Instalação de fachada")]
    pub name: String,

    #[schema(example = "250.00")]
    pub price: Decimal,

    #[schema(example = "2 horas")]
    pub duration: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServicePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Catálogo",
    request_body = CreateServicePayload,
    responses(
        (status = 201, description = "Serviço criado", body = Service),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Json(payload): Json<CreateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service = app_state
        .catalog_service
        .create_service(
            scope.0,
            &payload.name,
            payload.price,
            payload.duration.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

// GET /api/services
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Catálogo",
    responses((status = 200, description = "Serviços da empresa", body = Vec<Service>)),
    security(("api_jwt" = []))
)]
pub async fn list_services(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state.catalog_service.list_services(scope.0).await?;
    Ok((StatusCode::OK, Json(services)))
}

// PUT /api/services/{id}
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "Catálogo",
    request_body = UpdateServicePayload,
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço atualizado", body = Service),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service = app_state
        .catalog_service
        .update_service(
            scope.0,
            id,
            payload.name.as_deref(),
            payload.price,
            payload.duration.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(service)))
}

// DELETE /api/services/{id}
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 204, description = "Serviço removido"),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_service(scope.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
