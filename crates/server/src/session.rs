use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use dashmap::DashMap;
use rand::{rngs::OsRng, RngCore};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "acrodex_session";

#[derive(Clone, Debug)]
struct SessionData {
    user_id: Uuid,
    created_at: i64,
}

/// Process-local session registry. Sessions die with the process;
/// tokens are the durable credential.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionData>>,
    ttl_secs: i64,
}

impl SessionStore {
    pub fn new(ttl_hours: i64) -> Self {
        Self { sessions: Arc::new(DashMap::new()), ttl_secs: ttl_hours * 3600 }
    }

    /// Start a session for a user and return its opaque id.
    pub fn create(&self, user_id: Uuid) -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let id = URL_SAFE_NO_PAD.encode(bytes);
        self.sessions
            .insert(id.clone(), SessionData { user_id, created_at: Utc::now().timestamp() });
        id
    }

    /// Resolve a session id to its user, dropping it when past TTL.
    pub fn get(&self, id: &str) -> Option<Uuid> {
        let expired = match self.sessions.get(id) {
            Some(data) => {
                if Utc::now().timestamp() - data.created_at > self.ttl_secs {
                    true
                } else {
                    return Some(data.user_id);
                }
            }
            None => return None,
        };
        if expired {
            self.sessions.remove(id);
        }
        None
    }

    pub fn remove(&self, id: &str) {
        self.sessions.remove(id);
    }

    /// Session id from the request cookie, if any.
    pub fn id_from_jar(jar: &CookieJar) -> Option<String> {
        jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
    }
}

pub fn session_cookie(id: String, secure: bool, ttl_hours: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(ttl_hours))
        .path("/")
        .build()
}

pub fn logout_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(0))
        .path("/")
        .build()
}
