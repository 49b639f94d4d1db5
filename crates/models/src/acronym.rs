use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::acronym_category;
use crate::category;
use crate::errors;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "acronym")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub short: String,
    pub long: String,
    pub creator_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Creator,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Creator => Entity::belongs_to(user::Entity)
                .from(Column::CreatorId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        acronym_category::Relation::Category.def()
    }
    fn via() -> Option<RelationDef> {
        Some(acronym_category::Relation::Acronym.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_terms(short: &str, long: &str) -> Result<(), errors::ModelError> {
    if short.trim().is_empty() {
        return Err(errors::ModelError::Validation("short form required".into()));
    }
    if long.trim().is_empty() {
        return Err(errors::ModelError::Validation("long form required".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    short: &str,
    long: &str,
    creator_id: Uuid,
) -> Result<Model, errors::ModelError> {
    validate_terms(short, long)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        short: Set(short.to_string()),
        long: Set(long.to_string()),
        creator_id: Set(creator_id),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
