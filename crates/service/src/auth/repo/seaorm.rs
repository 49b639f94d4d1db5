use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::auth::domain::{ApiToken, AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn auth_user(u: models::user::Model) -> AuthUser {
    AuthUser { id: u.id, name: u.name, username: u.username }
}

fn api_token(t: models::token::Model) -> ApiToken {
    ApiToken { id: t.id, value: t.value, user_id: t.user_id, expires_at: t.expires_at.into() }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
        let res = models::user::Entity::find()
            .filter(models::user::Column::Username.eq(username.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| {
            let hash = u.password_hash.clone();
            Credentials { user: auth_user(u), password_hash: hash }
        }))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(auth_user))
    }

    async fn create_user(
        &self,
        name: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, name, username, password_hash)
            .await
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(auth_user(created))
    }

    async fn insert_token(
        &self,
        user_id: Uuid,
        value: &str,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<ApiToken, AuthError> {
        let created =
            models::token::create(&self.db, user_id, value, created_at.into(), expires_at.into())
                .await
                .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(api_token(created))
    }

    async fn find_token(&self, value: &str) -> Result<Option<ApiToken>, AuthError> {
        let res = models::token::Entity::find()
            .filter(models::token::Column::Value.eq(value.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(api_token))
    }
}
