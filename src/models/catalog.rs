// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

// Como o produto é medido na hora de orçar:
// UNIT   -> quantidade inteira (cartões, panfletos)
// M2     -> largura x altura em metros (lonas, adesivos)
// LINEAR_METER -> metros corridos (faixas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "measurement_unit", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    Unit,
    M2,
    LinearMeter,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,

    #[schema(ignore)]
    pub company_id: Uuid,

    #[schema(example = "Lona 440g")]
    pub name: String,

    #[schema(example = "Comunicação Visual")]
    pub category: String,

    // Preço por unidade de medida (ex: por m²)
    #[schema(example = "55.00")]
    pub price: Decimal,

    pub measurement_unit: MeasurementUnit,

    #[schema(example = "https://cdn.exemplo.com.br/lona.png")]
    pub image_url: Option<String>,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,

    #[schema(ignore)]
    pub company_id: Uuid,

    #[schema(example = "Instalação de fachada")]
    pub name: String,

    #[schema(example = "250.00")]
    pub price: Decimal,

    // Texto livre, ex: "2 horas"
    #[schema(example = "2 horas")]
    pub duration: Option<String>,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}
