// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{access_guard, auth_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário: exigem apenas login
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Cobrança: também só login, é o caminho de quem ainda não assinou
    let billing_routes = Router::new()
        .route("/checkout", post(handlers::billing::start_checkout))
        .route("/portal", post(handlers::billing::open_portal))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Daqui para baixo é negócio: login + assinatura ativa (access_guard)
    let client_routes = Router::new()
        .route(
            "/",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route(
            "/{id}",
            put(handlers::clients::update_client).delete(handlers::clients::delete_client),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            access_guard,
        ));

    let product_routes = Router::new()
        .route(
            "/",
            post(handlers::catalog::create_product).get(handlers::catalog::list_products),
        )
        .route(
            "/{id}",
            put(handlers::catalog::update_product).delete(handlers::catalog::delete_product),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            access_guard,
        ));

    let service_routes = Router::new()
        .route(
            "/",
            post(handlers::catalog::create_service).get(handlers::catalog::list_services),
        )
        .route(
            "/{id}",
            put(handlers::catalog::update_service).delete(handlers::catalog::delete_service),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            access_guard,
        ));

    let quote_routes = Router::new()
        .route(
            "/",
            post(handlers::quotes::create_quote).get(handlers::quotes::list_quotes),
        )
        .route(
            "/{id}",
            get(handlers::quotes::get_quote)
                .put(handlers::quotes::update_quote)
                .delete(handlers::quotes::delete_quote),
        )
        .route("/{id}/payments", post(handlers::quotes::add_payment))
        .route(
            "/{id}/payments/{payment_id}",
            axum::routing::delete(handlers::quotes::remove_payment),
        )
        .route("/{id}/convert", post(handlers::quotes::convert_quote))
        .route(
            "/{id}/production-status",
            put(handlers::quotes::update_production_status),
        )
        .route("/{id}/whatsapp", get(handlers::quotes::whatsapp_link))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            access_guard,
        ));

    let sale_routes = Router::new()
        .route(
            "/",
            post(handlers::sales::create_sale).get(handlers::sales::list_sales),
        )
        .route(
            "/{id}",
            put(handlers::sales::update_sale).delete(handlers::sales::delete_sale),
        )
        .route(
            "/{id}/production-status",
            put(handlers::sales::update_production_status),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            access_guard,
        ));

    let report_routes = Router::new()
        .route("/api/reports", get(handlers::reports::get_report))
        .route("/api/dashboard", get(handlers::reports::get_dashboard))
        .route("/api/status", get(handlers::status::system_status))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            access_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        // Link público de acompanhamento: sem autenticação
        .route("/api/acompanhar/{id}", get(handlers::tracking::track_order))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/billing", billing_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/products", product_routes)
        .nest("/api/services", service_routes)
        .nest("/api/quotes", quote_routes)
        .nest("/api/sales", sale_routes)
        .merge(report_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
