use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::acronym;
use crate::category;
use crate::errors;

/// Join row for the acronym/category many-to-many. The composite key
/// mirrors the schema-level uniqueness constraint.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "acronym_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub acronym_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Acronym,
    Category,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Acronym => Entity::belongs_to(acronym::Entity)
                .from(Column::AcronymId)
                .to(acronym::Column::Id)
                .into(),
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn attach(
    db: &DatabaseConnection,
    acronym_id: Uuid,
    category_id: Uuid,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel { acronym_id: Set(acronym_id), category_id: Set(category_id) };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn exists(
    db: &DatabaseConnection,
    acronym_id: Uuid,
    category_id: Uuid,
) -> Result<bool, errors::ModelError> {
    let found = Entity::find_by_id((acronym_id, category_id))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(found.is_some())
}
