// src/services/billing.rs

// Fronteira com o provedor de cobrança hospedado. Duas operações opacas:
// abrir um checkout de assinatura e abrir o portal de autoatendimento
// (cancelamento). Nos dois casos a resposta é só a URL para redirecionar
// o navegador; todo o resto acontece do lado do provedor.

use serde::Deserialize;
use serde_json::json;

use crate::common::error::AppError;

#[derive(Debug, Deserialize)]
struct HostedSession {
    url: String,
}

#[derive(Clone)]
pub struct BillingClient {
    http: reqwest::Client,
    api_url: String,
    secret_key: String,
    default_price_id: String,
    public_base_url: String,
}

impl BillingClient {
    pub fn new(
        api_url: String,
        secret_key: String,
        default_price_id: String,
        public_base_url: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            secret_key,
            default_price_id,
            public_base_url,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty()
    }

    // Inicia o checkout de assinatura; devolve a URL da página hospedada
    pub async fn create_checkout_session(
        &self,
        customer_email: &str,
        price_id: Option<&str>,
    ) -> Result<String, AppError> {
        let price_id = price_id.unwrap_or(&self.default_price_id);

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_url))
            .bearer_auth(&self.secret_key)
            .json(&json!({
                "mode": "subscription",
                "price_id": price_id,
                "customer_email": customer_email,
                "success_url": format!("{}/dashboard?success=true", self.public_base_url),
                "cancel_url": format!("{}/assinatura", self.public_base_url),
            }))
            .send()
            .await
            .map_err(|e| AppError::BillingProvider(e.to_string()))?;

        Self::session_url(response).await
    }

    // Portal de autoatendimento (trocar cartão, cancelar a assinatura)
    pub async fn create_portal_session(&self, customer_email: &str) -> Result<String, AppError> {
        let response = self
            .http
            .post(format!("{}/v1/billing_portal/sessions", self.api_url))
            .bearer_auth(&self.secret_key)
            .json(&json!({
                "customer_email": customer_email,
                "return_url": format!("{}/assinatura", self.public_base_url),
            }))
            .send()
            .await
            .map_err(|e| AppError::BillingProvider(e.to_string()))?;

        Self::session_url(response).await
    }

    async fn session_url(response: reqwest::Response) -> Result<String, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BillingProvider(format!(
                "resposta {status}: {body}"
            )));
        }

        let session: HostedSession = response
            .json()
            .await
            .map_err(|e| AppError::BillingProvider(e.to_string()))?;

        Ok(session.url)
    }
}
