// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{CatalogRepository, ClientRepository, QuoteRepository, SaleRepository, UserRepository},
    services::{
        auth::AuthService, billing::BillingClient, catalog_service::CatalogService,
        client_service::ClientService, quote_service::QuoteService,
        report_service::ReportService, sale_service::SaleService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    // Base dos links públicos de acompanhamento (ex: https://graficaexpress.com.br)
    pub public_base_url: String,

    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub catalog_service: CatalogService,
    pub quote_service: QuoteService,
    pub sale_service: SaleService,
    pub report_service: ReportService,
    pub billing: BillingClient,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "https://graficaexpress.com.br".to_string());

        // Provedor de cobrança (checkout hospedado)
        let billing_api_url =
            env::var("BILLING_API_URL").unwrap_or_else(|_| "https://api.stripe.com".to_string());
        let billing_secret_key = env::var("BILLING_SECRET_KEY").unwrap_or_default();
        let billing_price_id = env::var("BILLING_PRICE_ID").unwrap_or_default();

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let quote_repo = QuoteRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone(), db_pool.clone());
        let client_service = ClientService::new(client_repo.clone());
        let catalog_service = CatalogService::new(catalog_repo.clone());
        let quote_service = QuoteService::new(
            quote_repo.clone(),
            sale_repo.clone(),
            client_repo.clone(),
            catalog_repo.clone(),
            public_base_url.clone(),
        );
        let sale_service = SaleService::new(
            sale_repo.clone(),
            quote_repo.clone(),
            client_repo.clone(),
            catalog_repo.clone(),
            public_base_url.clone(),
        );
        let report_service = ReportService::new(quote_repo, sale_repo, client_repo);
        let billing = BillingClient::new(
            billing_api_url,
            billing_secret_key,
            billing_price_id,
            public_base_url.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            public_base_url,
            auth_service,
            client_service,
            catalog_service,
            quote_service,
            sale_service,
            report_service,
            billing,
        })
    }
}
