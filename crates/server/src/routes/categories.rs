use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use models::{acronym, category};
use service::categories;

use super::auth::ServerState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct CategoryData {
    pub name: String,
}

#[utoipa::path(post, path = "/api/categories", tag = "categories", request_body = crate::openapi::CategoryRequest, responses((status = 200, description = "Created"), (status = 400, description = "Bad Request"), (status = 401, description = "Unauthorized")))]
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<CategoryData>,
) -> Result<Json<category::Model>, ApiError> {
    let created = categories::create(&state.db, &data.name).await?;
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/categories", tag = "categories", responses((status = 200, description = "All categories")))]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<category::Model>>, ApiError> {
    let all = categories::list_all(&state.db).await?;
    Ok(Json(all))
}

#[utoipa::path(get, path = "/api/categories/{id}", tag = "categories", responses((status = 200, description = "One category"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<category::Model>, ApiError> {
    let found = categories::get(&state.db, id).await?;
    Ok(Json(found))
}

#[utoipa::path(get, path = "/api/categories/{id}/acronyms", tag = "categories", responses((status = 200, description = "Acronyms in the category"), (status = 404, description = "Not Found")))]
pub async fn get_acronyms(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<acronym::Model>>, ApiError> {
    let listed = categories::acronyms_of(&state.db, id).await?;
    Ok(Json(listed))
}
