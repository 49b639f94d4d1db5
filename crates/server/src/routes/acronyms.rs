use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use models::{acronym, category, user};
use service::acronyms;

use super::auth::{CurrentUser, ServerState};
use crate::errors::ApiError;

/// Create/update payload; the creator always comes from the
/// authenticated actor, never the body.
#[derive(Debug, Deserialize)]
pub struct AcronymData {
    pub short: String,
    pub long: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
}

#[utoipa::path(get, path = "/api/acronyms", tag = "acronyms", responses((status = 200, description = "All acronyms")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<acronym::Model>>, ApiError> {
    let all = acronyms::list_all(&state.db).await?;
    Ok(Json(all))
}

#[utoipa::path(get, path = "/api/acronyms/{id}", tag = "acronyms", responses((status = 200, description = "One acronym"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<acronym::Model>, ApiError> {
    let found = acronyms::get(&state.db, id).await?;
    Ok(Json(found))
}

#[utoipa::path(get, path = "/api/acronyms/search", tag = "acronyms", responses((status = 200, description = "Exact matches on short or long"), (status = 400, description = "Missing term")))]
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<acronym::Model>>, ApiError> {
    let term = params
        .term
        .ok_or_else(|| ApiError::BadRequest("missing search term in request".into()))?;
    let hits = acronyms::search(&state.db, &term).await?;
    Ok(Json(hits))
}

#[utoipa::path(get, path = "/api/acronyms/{id}/creator", tag = "acronyms", responses((status = 200, description = "Creating user"), (status = 404, description = "Not Found")))]
pub async fn get_creator(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<user::Public>, ApiError> {
    let creator = acronyms::creator_of(&state.db, id).await?;
    Ok(Json(creator.into()))
}

#[utoipa::path(get, path = "/api/acronyms/{id}/categories", tag = "acronyms", responses((status = 200, description = "Attached categories"), (status = 404, description = "Not Found")))]
pub async fn get_categories(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<category::Model>>, ApiError> {
    let cats = acronyms::categories_of(&state.db, id).await?;
    Ok(Json(cats))
}

#[utoipa::path(post, path = "/api/acronyms", tag = "acronyms", request_body = crate::openapi::AcronymRequest, responses((status = 200, description = "Created"), (status = 401, description = "Unauthorized")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(data): Json<AcronymData>,
) -> Result<Json<acronym::Model>, ApiError> {
    let created = acronyms::create(&state.db, &data.short, &data.long, user.id).await?;
    Ok(Json(created))
}

#[utoipa::path(put, path = "/api/acronyms/{id}", tag = "acronyms", request_body = crate::openapi::AcronymRequest, responses((status = 200, description = "Updated"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(data): Json<AcronymData>,
) -> Result<Json<acronym::Model>, ApiError> {
    let updated = acronyms::update(&state.db, id, &data.short, &data.long, user.id).await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/acronyms/{id}", tag = "acronyms", responses((status = 204, description = "Deleted"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    acronyms::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/acronyms/{id}/categories/{category_id}", tag = "acronyms", responses((status = 200, description = "Attached"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not Found"), (status = 409, description = "Already attached")))]
pub async fn attach_category(
    State(state): State<ServerState>,
    Path((id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    acronyms::attach_category(&state.db, id, category_id).await?;
    Ok(StatusCode::OK)
}
