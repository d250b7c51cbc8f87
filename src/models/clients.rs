// src/models/clients.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Cliente da gráfica. O nome e o telefone viram "snapshot" dentro dos
// orçamentos e vendas, então editar o cliente não reescreve o histórico.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(ignore)]
    pub company_id: Uuid,

    #[schema(example = "Maria da Silva")]
    pub name: String,

    // Obrigatório: é por aqui que sai o link de acompanhamento no WhatsApp
    #[schema(example = "(71) 99999-0000")]
    pub phone: String,

    #[schema(example = "maria@email.com")]
    pub email: Option<String>,

    #[schema(example = "Rua das Flores, 123 - Salvador/BA")]
    pub address: Option<String>,

    #[schema(example = "12345678900")]
    pub cpf_cnpj: Option<String>,

    pub created_at: DateTime<Utc>,
}
