use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use uuid::Uuid;

use crate::errors::ServiceError;
use models::{acronym, category};

pub async fn create(db: &DatabaseConnection, name: &str) -> Result<category::Model, ServiceError> {
    let created = category::create(db, name).await?;
    Ok(created)
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<category::Model>, ServiceError> {
    category::Entity::find().all(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<category::Model, ServiceError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("category"))
}

/// Acronyms filed under a category, through the pivot.
pub async fn acronyms_of(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Vec<acronym::Model>, ServiceError> {
    let found = get(db, id).await?;
    found
        .find_related(acronym::Entity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}
