use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use models::{acronym, acronym_category, category, user};

/// List every acronym; ordering is whatever the storage engine returns.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<acronym::Model>, ServiceError> {
    acronym::Entity::find().all(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get one acronym by id.
pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<acronym::Model, ServiceError> {
    acronym::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("acronym"))
}

/// Create an acronym owned by `creator_id` (the authenticated actor).
pub async fn create(
    db: &DatabaseConnection,
    short: &str,
    long: &str,
    creator_id: Uuid,
) -> Result<acronym::Model, ServiceError> {
    let created = acronym::create(db, short, long, creator_id).await?;
    Ok(created)
}

/// Full overwrite of the mutable fields. The creator is reassigned to
/// whoever issues the edit, so editing transfers ownership.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    short: &str,
    long: &str,
    creator_id: Uuid,
) -> Result<acronym::Model, ServiceError> {
    acronym::validate_terms(short, long)?;
    let mut am: acronym::ActiveModel = acronym::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("acronym"))?
        .into();
    am.short = Set(short.to_string());
    am.long = Set(long.to_string());
    am.creator_id = Set(creator_id);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Delete an acronym; pivot rows go with it via FK cascade.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = acronym::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("acronym"));
    }
    Ok(())
}

/// Resolve the belongs-to relation to the creating user.
pub async fn creator_of(db: &DatabaseConnection, id: Uuid) -> Result<user::Model, ServiceError> {
    let acronym = get(db, id).await?;
    acronym
        .find_related(user::Entity)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("creator"))
}

/// Resolve the many-to-many relation through the pivot.
pub async fn categories_of(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Vec<category::Model>, ServiceError> {
    let acronym = get(db, id).await?;
    acronym
        .find_related(category::Entity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Associate an acronym with a category. A second attach of the same
/// pair is a conflict, mirroring the pivot's composite key.
pub async fn attach_category(
    db: &DatabaseConnection,
    acronym_id: Uuid,
    category_id: Uuid,
) -> Result<(), ServiceError> {
    get(db, acronym_id).await?;
    category::Entity::find_by_id(category_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("category"))?;
    if acronym_category::exists(db, acronym_id, category_id).await? {
        return Err(ServiceError::Conflict("category already attached".into()));
    }
    acronym_category::attach(db, acronym_id, category_id).await?;
    Ok(())
}

/// Exact-match search: rows whose short OR long form equals `term`.
/// No substring matching, case-sensitive.
pub async fn search(
    db: &DatabaseConnection,
    term: &str,
) -> Result<Vec<acronym::Model>, ServiceError> {
    acronym::Entity::find()
        .filter(
            Condition::any()
                .add(acronym::Column::Short.eq(term))
                .add(acronym::Column::Long.eq(term)),
        )
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}
