use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{ApiToken, AuthUser, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub token_ttl_hours: i64,
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash_password(&self, plaintext: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { token_ttl_hours: 12 });
    /// let input = RegisterInput { name: "Test".into(), username: "tester".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "tester");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if self.repo.find_credentials(&input.username).await?.is_some() {
            return Err(AuthError::Conflict);
        }

        let hash = self.hash_password(&input.password)?;
        let user = self.repo.create_user(&input.name, &input.username, &hash).await?;
        info!(user_id = %user.id, username = %user.username, "user_registered");
        Ok(user)
    }

    /// Check a username/password pair against the stored hash.
    ///
    /// A miss (unknown username or wrong password) is a normal outcome
    /// and yields `Ok(None)`, not an error.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { token_ttl_hours: 12 });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { name: "N".into(), username: "u".into(), password: "Passw0rd".into() }));
    /// let user = tokio_test::block_on(svc.verify_credentials("u", "Passw0rd")).unwrap();
    /// assert!(user.is_some());
    /// let miss = tokio_test::block_on(svc.verify_credentials("u", "wrong")).unwrap();
    /// assert!(miss.is_none());
    /// ```
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthUser>, AuthError> {
        let Some(cred) = self.repo.find_credentials(username).await? else {
            return Ok(None);
        };
        let parsed =
            PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        if Argon2::default().verify_password(password.as_bytes(), &parsed).is_err() {
            return Ok(None);
        }
        Ok(Some(cred.user))
    }

    /// Issue an opaque bearer token for a user.
    ///
    /// 16 bytes from the OS RNG, base64-encoded; the row carries an
    /// expiry of now + configured TTL.
    #[instrument(skip(self))]
    pub async fn issue_token(&self, user_id: Uuid) -> Result<ApiToken, AuthError> {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        let value = BASE64.encode(bytes);

        let now = Utc::now();
        let expires_at = now + Duration::hours(self.cfg.token_ttl_hours);
        let token = self.repo.insert_token(user_id, &value, now, expires_at).await?;
        info!(user_id = %user_id, token_id = %token.id, "token_issued");
        Ok(token)
    }

    /// Resolve a bearer token to its owning user.
    ///
    /// Unknown, expired, or orphaned tokens all collapse to
    /// `Unauthorized`; the caller never learns which.
    pub async fn authenticate_bearer(&self, value: &str) -> Result<AuthUser, AuthError> {
        let token = self.repo.find_token(value).await?.ok_or(AuthError::Unauthorized)?;
        if token.expires_at <= Utc::now() {
            return Err(AuthError::Unauthorized);
        }
        self.repo
            .find_user_by_id(token.user_id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}
