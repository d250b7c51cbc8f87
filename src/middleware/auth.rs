// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::auth::User};

// Valida o Bearer token e insere o usuário nos "extensions" da
// requisição. Usado nas rotas que só exigem login (ex: billing).
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = bearer_header(&request);
    let user = authenticate(&app_state, auth_header).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Autenticação + gate de autorização: além do token válido, o e-mail
// precisa estar na lista de assinantes ativos. A lista é consultada a
// cada requisição, sem cache da decisão.
pub async fn access_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = bearer_header(&request);
    let user = authenticate(&app_state, auth_header).await?;
    app_state.auth_service.ensure_authorized(&user.email).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Lê o cabeçalho Authorization como &str. Feito fora da parte assíncrona:
// manter uma referência à Request (cujo Body não é Sync) viva através de
// um await tornaria o future não-Send, o que o axum exige nos middlewares.
fn bearer_header(request: &Request) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
}

async fn authenticate(
    app_state: &AppState,
    auth_header: Option<&str>,
) -> Result<User, AppError> {
    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            return app_state.auth_service.validate_token(token).await;
        }
    }

    Err(AppError::InvalidToken)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

// O escopo de empresa de toda leitura e escrita de negócio. Derivado do
// usuário autenticado (cada usuário pertence a exatamente uma gráfica),
// não de cabeçalho: impossível pedir dados de outra empresa.
#[derive(Debug, Clone, Copy)]
pub struct CompanyScope(pub Uuid);

impl<S> FromRequestParts<S> for CompanyScope
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .map(|user| CompanyScope(user.company_id))
            .ok_or(AppError::InvalidToken)
    }
}
