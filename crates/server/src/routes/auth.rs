use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sea_orm::DatabaseConnection;
use tracing::warn;

use service::auth::domain::AuthUser;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};

use crate::errors::ApiError;
use crate::session::SessionStore;

/// Auth knobs lifted out of [`configs::AuthConfig`] at startup.
#[derive(Clone)]
pub struct AuthSettings {
    pub token_ttl_hours: i64,
    pub session_ttl_hours: i64,
    pub secure_cookies: bool,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub sessions: SessionStore,
    pub auth: AuthSettings,
}

/// The authenticated actor, injected into request extensions by the
/// bearer and session gates.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

/// Auth service over the live database.
pub fn auth_service(state: &ServerState) -> AuthService<SeaOrmAuthRepository> {
    AuthService::new(
        Arc::new(SeaOrmAuthRepository { db: state.db.clone() }),
        AuthConfig { token_ttl_hours: state.auth.token_ttl_hours },
    )
}

/// Bearer gate for mutating API routes: resolves `Authorization:
/// Bearer <token>` to a user before the handler runs, or rejects with
/// 401. No redirect; API clients get a status, not a login page.
pub async fn require_bearer(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let authz = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            warn!(path = %path, "missing Authorization header");
            ApiError::Unauthorized
        })?;
    let token = authz.strip_prefix("Bearer ").ok_or_else(|| {
        warn!(path = %path, "invalid Authorization format (expect Bearer)");
        ApiError::Unauthorized
    })?;

    let user = auth_service(&state).authenticate_bearer(token).await.map_err(|e| {
        warn!(path = %path, code = e.code(), "token validation failed");
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Decode an HTTP Basic `Authorization` header into (username, password).
pub fn parse_basic_auth(headers: &HeaderMap) -> Option<(String, String)> {
    let authz = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = authz.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
