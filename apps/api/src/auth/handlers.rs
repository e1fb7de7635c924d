//! Axum route handlers for admin authentication.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

const SESSION_COOKIE: &str = "admin-token";
const SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/admin/login
///
/// Checks credentials against the configured email and password hash, mints
/// a session token, and sets it as an HTTP-only cookie.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let provided_hash = sha256_hex(request.password.as_bytes());
    if request.email != state.config.admin_email
        || provided_hash != state.config.admin_password_hash
    {
        return Err(AppError::Unauthorized);
    }

    let token = mint_token(&request.email, &state.config.session_secret);
    state.sessions.add(token.clone());
    info!("admin session opened");

    let cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Max-Age={SESSION_MAX_AGE_SECS}; Path=/"
    );
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(json!({ "success": true, "message": "Login successful" })),
    ))
}

/// POST /api/v1/admin/logout
///
/// Drops the session from the store and expires the cookie. Always succeeds,
/// even without a valid session.
pub async fn handle_logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(&token);
        info!("admin session closed");
    }

    let cookie = format!("{SESSION_COOKIE}=; Max-Age=0; Path=/");
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(json!({ "success": true, "message": "Logged out" })),
    )
}

/// GET /api/v1/admin/verify
pub async fn handle_verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = session_token(&headers).ok_or(AppError::Unauthorized)?;
    if !state.sessions.contains(&token) {
        return Err(AppError::Unauthorized);
    }
    Ok(Json(json!({ "authenticated": true })))
}

/// Pulls the admin session token out of the `Cookie` header.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

fn mint_token(email: &str, secret: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    sha256_hex(format!("{email}:{now}:{secret}").as_bytes())
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_extracted_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin-token=abc123; lang=en"),
        );
        assert_eq!(session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_session_token_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_token(&headers), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_sha256_hex_is_stable() {
        // echo -n admin123 | sha256sum
        assert_eq!(
            sha256_hex(b"admin123"),
            "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
        );
    }

    #[test]
    fn test_minted_tokens_are_unique_per_call() {
        let a = mint_token("admin@example.com", "secret");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = mint_token("admin@example.com", "secret");
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
