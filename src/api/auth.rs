use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{verify_password, SessionStore};
use crate::domain::DomainError;
use crate::infrastructure::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[utoipa::path(
    post,
    path = "/register",
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    match state
        .user_repo
        .create(&payload.username, &payload.password)
        .await
    {
        Ok(user) => {
            tracing::info!("Registered user: {}", user.username);
            (
                StatusCode::CREATED,
                format!("User {} registered successfully.", user.username),
            )
                .into_response()
        }
        Err(DomainError::DuplicateUser) => {
            tracing::warn!("Username already taken: {}", payload.username);
            (StatusCode::BAD_REQUEST, "Username already taken.").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to register user: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[utoipa::path(
    post,
    path = "/login",
    responses(
        (status = 200, description = "Logged in, session token in body"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for user: {}", payload.username);

    let creds = match state.user_repo.find_by_username(&payload.username).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            tracing::warn!("User not found: {}", payload.username);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Login lookup failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if verify_password(&payload.password, &creds.salt, &creds.password_hash) {
        let token = state.sessions.issue(&creds.username);
        tracing::info!("Password verified successfully for user: {}", creds.username);
        (
            StatusCode::OK,
            Json(json!({
                "token": token,
                "message": "Login successful! You can now add or delete books."
            })),
        )
            .into_response()
    } else {
        tracing::warn!("Password verification failed for user: {}", creds.username);
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        )
            .into_response()
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 200, description = "Session revoked (idempotent)"))
)]
pub async fn logout(
    State(sessions): State<SessionStore>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        sessions.revoke(token);
    }

    (
        StatusCode::OK,
        "Logout successful. Protected routes are now locked.",
    )
}
