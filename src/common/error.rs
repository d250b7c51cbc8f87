// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Valor monetário que não parseia ou é <= 0
    #[error("Valor inválido: {0}")]
    InvalidAmount(String),

    // Item de orçamento/venda com quantidade, medidas ou preço inválidos
    #[error("Item inválido: {0}")]
    InvalidItem(String),

    // Tentativa de setar manualmente um status que é derivado
    #[error("Mudança de status inválida: {0}")]
    InvalidStatusChange(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Serviço não encontrado")]
    ServiceNotFound,

    #[error("Orçamento não encontrado")]
    QuoteNotFound,

    #[error("Venda não encontrada")]
    SaleNotFound,

    #[error("Pagamento não encontrado")]
    PaymentNotFound,

    #[error("Orçamento já convertido em venda")]
    QuoteAlreadyConverted,

    // Autenticado, mas fora da lista de assinantes ativos
    #[error("Assinatura necessária")]
    SubscriptionRequired,

    #[error("Falha no provedor de cobrança: {0}")]
    BillingProvider(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidAmount(ref msg)
            | AppError::InvalidItem(ref msg)
            | AppError::InvalidStatusChange(ref msg) => {
                let body = Json(json!({ "error": msg }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            // O gate de autorização não é um erro comum: devolve um
            // call-to-action de assinatura junto com o 402.
            AppError::SubscriptionRequired => {
                let body = Json(json!({
                    "error": "Seu e-mail ainda não está autorizado a utilizar o sistema.",
                    "action": "Confirme sua assinatura em POST /api/billing/checkout.",
                }));
                return (StatusCode::PAYMENT_REQUIRED, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.")
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::ClientNotFound => (StatusCode::NOT_FOUND, "Cliente não encontrado."),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Produto não encontrado."),
            AppError::ServiceNotFound => (StatusCode::NOT_FOUND, "Serviço não encontrado."),
            AppError::QuoteNotFound => (
                StatusCode::NOT_FOUND,
                "Orçamento não encontrado. O link pode estar incorreto ou o orçamento foi removido.",
            ),
            AppError::SaleNotFound => (StatusCode::NOT_FOUND, "Venda não encontrada."),
            AppError::PaymentNotFound => (StatusCode::NOT_FOUND, "Pagamento não encontrado."),
            AppError::QuoteAlreadyConverted => (
                StatusCode::CONFLICT,
                "Este orçamento já foi convertido em venda.",
            ),
            AppError::BillingProvider(ref e) => {
                tracing::error!("Falha no provedor de cobrança: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Não foi possível falar com o provedor de cobrança.",
                )
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
