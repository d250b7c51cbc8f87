// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Clientes ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Catálogo ---
        handlers::catalog::create_product,
        handlers::catalog::list_products,
        handlers::catalog::update_product,
        handlers::catalog::delete_product,
        handlers::catalog::create_service,
        handlers::catalog::list_services,
        handlers::catalog::update_service,
        handlers::catalog::delete_service,

        // --- Orçamentos ---
        handlers::quotes::create_quote,
        handlers::quotes::list_quotes,
        handlers::quotes::get_quote,
        handlers::quotes::update_quote,
        handlers::quotes::delete_quote,
        handlers::quotes::add_payment,
        handlers::quotes::remove_payment,
        handlers::quotes::convert_quote,
        handlers::quotes::update_production_status,
        handlers::quotes::whatsapp_link,

        // --- Vendas ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,
        handlers::sales::update_production_status,

        // --- Relatórios ---
        handlers::reports::get_report,
        handlers::reports::get_dashboard,

        // --- Acompanhamento público ---
        handlers::tracking::track_order,

        // --- Assinatura ---
        handlers::billing::start_checkout,
        handlers::billing::open_portal,

        // --- Sistema ---
        handlers::status::system_status,
    ),
    components(
        schemas(
            models::auth::AuthResponse,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::User,
            models::auth::Company,
            models::auth::AuthorizedUser,

            models::clients::Client,
            handlers::clients::CreateClientPayload,
            handlers::clients::UpdateClientPayload,

            models::catalog::Product,
            models::catalog::Service,
            models::catalog::MeasurementUnit,
            handlers::catalog::CreateProductPayload,
            handlers::catalog::UpdateProductPayload,
            handlers::catalog::CreateServicePayload,
            handlers::catalog::UpdateServicePayload,

            models::quotes::Quote,
            models::quotes::QuoteItem,
            models::quotes::Payment,
            models::quotes::QuoteDetail,
            models::quotes::QuoteStatus,
            models::quotes::ProductionStatus,
            models::quotes::PaymentMethod,
            crate::services::items::NewItemPayload,
            handlers::quotes::CreateQuotePayload,
            handlers::quotes::UpdateQuotePayload,
            handlers::quotes::AddPaymentPayload,
            handlers::quotes::ConvertQuotePayload,
            handlers::quotes::ProductionStatusPayload,
            handlers::quotes::ProductionStatusResponse,

            models::sales::Sale,
            models::sales::SaleItem,
            models::sales::SaleDetail,
            models::sales::SaleStatus,
            handlers::sales::CreateSalePayload,
            handlers::sales::UpdateSalePayload,

            models::reports::ReportResponse,
            models::reports::SalesReport,
            models::reports::QuotesReport,
            models::reports::MonthlyPoint,
            models::reports::MonthlyCount,
            models::reports::DashboardSummary,

            models::tracking::TrackingView,
            models::tracking::TimelineStep,
            models::tracking::TrackingItem,
            models::tracking::TrackingPayment,

            handlers::billing::CheckoutPayload,
            handlers::billing::HostedPageResponse,
            handlers::status::SystemStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registro, login e sessão"),
        (name = "Clientes", description = "Cadastro de clientes"),
        (name = "Catálogo", description = "Produtos e serviços"),
        (name = "Orçamentos", description = "Orçamentos, pagamentos, conversão e produção"),
        (name = "Vendas", description = "Vendas diretas e convertidas"),
        (name = "Relatórios", description = "Dashboard e relatórios por período"),
        (name = "Acompanhamento", description = "Página pública de acompanhamento"),
        (name = "Assinatura", description = "Checkout e portal do provedor de cobrança"),
        (name = "Sistema", description = "Saúde e diagnóstico"),
    ),
    info(
        title = "GestãoGraf API",
        description = "Sistema de gestão para gráficas: clientes, catálogo, orçamentos, vendas e acompanhamento de produção.",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
