use dashmap::DashMap;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Json},
    http::{request::Parts, StatusCode},
};
use serde_json::json;

/// Generate a fresh per-user salt: 16 random bytes, hex-encoded
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Salted digest: hex(SHA-256(password || salt))
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recompute the digest with the stored salt and compare it to the stored
/// one without short-circuiting, so comparison time does not depend on
/// where the digests diverge.
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    let computed = hash_password(password, salt);
    constant_time_eq(computed.as_bytes(), stored_hash.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Server-side session registry mapping opaque bearer tokens to usernames.
///
/// Tokens are unguessable and live until logout or process exit; there is
/// no expiry. Several identities can be logged in at once, each with its
/// own token.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for a user that just authenticated
    pub fn issue(&self, username: &str) -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        self.sessions.insert(token.clone(), username.to_string());
        token
    }

    /// Revoke a token. Revoking an unknown token is a no-op.
    pub fn revoke(&self, token: &str) {
        self.sessions.remove(token);
    }

    pub fn username_for(&self, token: &str) -> Option<String> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }
}

/// The authenticated identity behind a request.
///
/// Extracting this is the auth guard: a handler that takes an `AuthSession`
/// only runs when the request carries a valid bearer token, so a denied
/// request has no side effects.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthSession
where
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Missing Authorization header" })),
            ))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid Authorization header format" })),
        ))?;

        let sessions = SessionStore::from_ref(state);
        match sessions.username_for(token) {
            Some(username) => Ok(AuthSession { username }),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Not logged in" })),
            )),
        }
    }
}
