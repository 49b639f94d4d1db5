use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use sea_orm::EntityTrait;
use serde::Deserialize;
use uuid::Uuid;

use models::{acronym, token, user};
use service::auth::domain::RegisterInput;
use service::users;

use super::auth::{auth_service, parse_basic_auth, ServerState};
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateUserData {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// `POST /api/users` — the plaintext password is hashed here and never
/// persisted or echoed back; the response is the public projection.
#[utoipa::path(post, path = "/api/users", tag = "users", request_body = crate::openapi::CreateUserRequest, responses((status = 200, description = "Created"), (status = 400, description = "Bad Request"), (status = 409, description = "Username taken")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<CreateUserData>,
) -> Result<Json<user::Public>, ApiError> {
    let svc = auth_service(&state);
    let registered = svc
        .register(RegisterInput {
            name: data.name,
            username: data.username,
            password: data.password,
        })
        .await?;
    let public = users::get(&state.db, registered.id).await?;
    Ok(Json(public))
}

#[utoipa::path(get, path = "/api/users", tag = "users", responses((status = 200, description = "All users, public projection")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<user::Public>>, ApiError> {
    let all = users::list_all(&state.db).await?;
    Ok(Json(all))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "users", responses((status = 200, description = "One user, public projection"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<user::Public>, ApiError> {
    let found = users::get(&state.db, id).await?;
    Ok(Json(found))
}

#[utoipa::path(get, path = "/api/users/{id}/acronyms", tag = "users", responses((status = 200, description = "Acronyms authored by the user"), (status = 404, description = "Not Found")))]
pub async fn get_acronyms(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<acronym::Model>>, ApiError> {
    let authored = users::acronyms_of(&state.db, id).await?;
    Ok(Json(authored))
}

/// `POST /api/users/login` — HTTP Basic in, bearer token out. A wrong
/// password is a 401, not a server error.
#[utoipa::path(post, path = "/api/users/login", tag = "users", responses((status = 200, description = "Issued token"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> Result<Json<token::Model>, ApiError> {
    let (username, password) = parse_basic_auth(&headers).ok_or(ApiError::Unauthorized)?;
    let svc = auth_service(&state);
    let user = svc
        .verify_credentials(&username, &password)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    let issued = svc.issue_token(user.id).await?;

    // Hand back the persisted row so the client sees the same shape a
    // later lookup would return
    let found = token::Entity::find_by_id(issued.id)
        .one(&state.db)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or_else(|| ApiError::Internal("token vanished after insert".into()))?;
    Ok(Json(found))
}
