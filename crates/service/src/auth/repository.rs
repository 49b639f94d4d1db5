use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::domain::{ApiToken, AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(
        &self,
        name: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<AuthUser, AuthError>;

    async fn insert_token(
        &self,
        user_id: Uuid,
        value: &str,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<ApiToken, AuthError>;
    async fn find_token(&self, value: &str) -> Result<Option<ApiToken>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, Credentials>>, // key: username
        tokens: Mutex<HashMap<String, ApiToken>>,   // key: token value
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).cloned())
        }

        async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|c| c.user.id == id).map(|c| c.user.clone()))
        }

        async fn create_user(
            &self,
            name: &str,
            username: &str,
            password_hash: &str,
        ) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(username) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                name: name.to_string(),
                username: username.to_string(),
            };
            users.insert(
                username.to_string(),
                Credentials { user: user.clone(), password_hash: password_hash.to_string() },
            );
            Ok(user)
        }

        async fn insert_token(
            &self,
            user_id: Uuid,
            value: &str,
            _created_at: DateTime<Utc>,
            expires_at: DateTime<Utc>,
        ) -> Result<ApiToken, AuthError> {
            let mut tokens = self.tokens.lock().unwrap();
            let token = ApiToken {
                id: Uuid::new_v4(),
                value: value.to_string(),
                user_id,
                expires_at,
            };
            tokens.insert(value.to_string(), token.clone());
            Ok(token)
        }

        async fn find_token(&self, value: &str) -> Result<Option<ApiToken>, AuthError> {
            let tokens = self.tokens.lock().unwrap();
            Ok(tokens.get(value).cloned())
        }
    }
}
