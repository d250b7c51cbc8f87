// src/models/sales.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::quotes::{PaymentMethod, ProductionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Pending,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,

    #[schema(ignore)]
    pub company_id: Uuid,

    pub client_id: Uuid,

    #[schema(example = "Maria da Silva")]
    pub client_name: String,
    pub client_phone: Option<String>,

    // Presente quando a venda nasceu de um orçamento convertido;
    // é por esse vínculo que o status de produção fica espelhado.
    pub quote_id: Option<Uuid>,

    #[schema(example = "150.00")]
    pub total: Decimal,

    pub payment_method: PaymentMethod,

    pub status: SaleStatus,

    pub production_status: Option<ProductionStatus>,

    #[schema(value_type = Option<String>, format = Date, example = "2026-08-20")]
    pub delivery_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: Uuid,

    #[schema(ignore)]
    pub sale_id: Uuid,

    pub product_id: Option<Uuid>,
    pub service_id: Option<Uuid>,

    #[schema(example = "Lona 440g")]
    pub name: String,

    #[schema(example = "3.0")]
    pub quantity: Decimal,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,

    #[schema(example = "50.00")]
    pub unit_price: Decimal,

    #[schema(example = "150.00")]
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}
