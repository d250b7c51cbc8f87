// src/models/quotes.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

// Situação comercial do orçamento. A parte de pagamento
// (PARTIALLY_PAID / FULLY_PAID) é derivada do somatório dos pagamentos
// registrados, nunca setada "na mão" pelo cliente da API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "quote_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Pending,
    Approved,
    Rejected,
    Converted,
    PartiallyPaid,
    FullyPaid,
}

// Etapas de produção, na ordem em que aparecem na linha do tempo
// da página pública de acompanhamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "production_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProductionStatus {
    WaitingApproval,
    Approved,
    InProduction,
    Finishing,
    Ready,
    Delivered,
}

impl ProductionStatus {
    pub const STEPS: [ProductionStatus; 6] = [
        ProductionStatus::WaitingApproval,
        ProductionStatus::Approved,
        ProductionStatus::InProduction,
        ProductionStatus::Finishing,
        ProductionStatus::Ready,
        ProductionStatus::Delivered,
    ];

    // Posição na linha do tempo (0 = aguardando aprovação)
    pub fn step_index(self) -> usize {
        Self::STEPS.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            ProductionStatus::WaitingApproval => "Aguardando Aprovação",
            ProductionStatus::Approved => "Aprovado",
            ProductionStatus::InProduction => "Em Produção",
            ProductionStatus::Finishing => "Acabamento",
            ProductionStatus::Ready => "Pronto para Retirada",
            ProductionStatus::Delivered => "Entregue",
        }
    }

    // Só avisamos o cliente quando o pedido fica pronto ou é entregue
    pub fn notifies_client(self) -> bool {
        matches!(self, ProductionStatus::Ready | ProductionStatus::Delivered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Credit,
    Debit,
    Pix,
    Boleto,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Credit => "Cartão de Crédito",
            PaymentMethod::Debit => "Cartão de Débito",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Boleto => "Boleto",
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,

    #[schema(ignore)]
    pub company_id: Uuid,

    pub client_id: Uuid,

    // Snapshot do cliente no momento da criação (histórico fiel mesmo
    // que o cadastro mude depois)
    #[schema(example = "Maria da Silva")]
    pub client_name: String,
    pub client_phone: Option<String>,

    // Soma dos totais dos itens, recalculada a cada gravação
    #[schema(example = "150.00")]
    pub total: Decimal,

    pub status: QuoteStatus,
    pub production_status: ProductionStatus,

    pub valid_until: DateTime<Utc>,

    #[schema(value_type = Option<String>, format = Date, example = "2026-08-20")]
    pub delivery_date: Option<NaiveDate>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Item orçado. Sempre um snapshot: nome e preço são copiados do
// catálogo na hora, e mudanças futuras de preço não afetam o item.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub id: Uuid,

    #[schema(ignore)]
    pub quote_id: Uuid,

    pub product_id: Option<Uuid>,
    pub service_id: Option<Uuid>,

    #[schema(example = "Lona 440g")]
    pub name: String,

    // Para produtos em m², quantity = largura x altura
    #[schema(example = "3.0")]
    pub quantity: Decimal,
    #[schema(example = "2.5")]
    pub width: Option<Decimal>,
    #[schema(example = "1.2")]
    pub height: Option<Decimal>,

    #[schema(example = "50.00")]
    pub unit_price: Decimal,

    #[schema(example = "150.00")]
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,

    #[schema(ignore)]
    pub quote_id: Uuid,

    #[schema(example = "100.00")]
    pub amount: Decimal,

    pub method: PaymentMethod,

    pub created_at: DateTime<Utc>,
}

// Snapshot calculado de um item, pronto para inserir em um orçamento
// ou em uma venda (os dois compartilham o mesmo formato de linha).
#[derive(Debug, Clone)]
pub struct ItemSnapshot {
    pub product_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub name: String,
    pub quantity: Decimal,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
    pub unit_price: Decimal,
    pub total: Decimal,
}

// Orçamento completo como o front consome: cabeçalho + itens + pagamentos
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDetail {
    #[serde(flatten)]
    pub quote: Quote,
    pub items: Vec<QuoteItem>,
    pub payments: Vec<Payment>,
}

impl QuoteDetail {
    // Total já pago neste orçamento
    pub fn paid_amount(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    // Quanto falta (nunca negativo; excedente é reportado à parte)
    pub fn remaining_amount(&self) -> Decimal {
        (self.quote.total - self.paid_amount()).max(Decimal::ZERO)
    }
}
