//! Read-side user operations. Creation goes through
//! [`crate::auth::service::AuthService::register`], which owns the
//! hashing and uniqueness rules.
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use uuid::Uuid;

use crate::errors::ServiceError;
use models::{acronym, user};

/// List all users as the public projection.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<user::Public>, ServiceError> {
    let users = user::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(users.into_iter().map(user::Public::from).collect())
}

/// Get one user by id as the public projection.
pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<user::Public, ServiceError> {
    let found = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    Ok(found.into())
}

/// Acronyms authored by a user.
pub async fn acronyms_of(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Vec<acronym::Model>, ServiceError> {
    let found = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    found
        .find_related(acronym::Entity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}
