use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "token")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub value: String,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub expires_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    user_id: Uuid,
    value: &str,
    created_at: DateTimeWithTimeZone,
    expires_at: DateTimeWithTimeZone,
) -> Result<Model, errors::ModelError> {
    if value.len() < 16 {
        return Err(errors::ModelError::Validation("token value too short".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        value: Set(value.to_string()),
        user_id: Set(user_id),
        created_at: Set(created_at),
        expires_at: Set(expires_at),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
