// src/models/tracking.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::quotes::ProductionStatus;

// Projeção pública de um orçamento para a página /acompanhar/:id.
// Sem autenticação: só o que o cliente final pode ver.

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub status: ProductionStatus,
    #[schema(example = "Em Produção")]
    pub label: String,
    // Etapa já alcançada (inclui a atual)
    pub completed: bool,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingItem {
    #[schema(example = "Lona 440g")]
    pub name: String,
    #[schema(example = "3.0")]
    pub quantity: Decimal,
    #[schema(example = "50.00")]
    pub unit_price: Decimal,
    #[schema(example = "150.00")]
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingPayment {
    #[schema(example = "100.00")]
    pub amount: Decimal,
    #[schema(example = "PIX")]
    pub method: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingView {
    // Primeiros 8 caracteres do id, em maiúsculas (o "número" do pedido)
    #[schema(example = "550E8400")]
    pub order_number: String,

    #[schema(example = "Maria da Silva")]
    pub client_name: String,

    pub created_at: DateTime<Utc>,

    #[schema(value_type = Option<String>, format = Date)]
    pub delivery_date: Option<NaiveDate>,

    #[schema(example = "150.00")]
    pub total: Decimal,

    pub production_status: ProductionStatus,
    pub timeline: Vec<TimelineStep>,

    pub items: Vec<TrackingItem>,

    pub payments: Vec<TrackingPayment>,
    #[schema(example = "100.00")]
    pub paid_amount: Decimal,
    #[schema(example = "50.00")]
    pub remaining_amount: Decimal,
    // Presente apenas quando o cliente pagou mais que o total
    pub surplus_amount: Option<Decimal>,

    pub notes: Option<String>,
}
