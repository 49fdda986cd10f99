//! Authentication for the back office
//!
//! One shared admin password, configured in the TOML config file and kept
//! as a SHA-256 digest in memory. A successful login issues a random
//! session token; protected routes require it in the `X-Admin-Token`
//! header. An empty configured password disables the gate entirely
//! (development mode), mirroring how an unset secret disables API auth in
//! the other services.

use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

/// Header carrying the session token on protected routes
pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Login gate state: configured password digest plus live session tokens
pub struct AuthGate {
    /// None when the gate is disabled (empty configured password)
    password_digest: Option<[u8; 32]>,
    sessions: RwLock<HashSet<String>>,
}

impl AuthGate {
    /// Build the gate from the configured password
    pub fn new(password: &str) -> Self {
        let password_digest = if password.is_empty() {
            None
        } else {
            Some(Sha256::digest(password.as_bytes()).into())
        };
        Self {
            password_digest,
            sessions: RwLock::new(HashSet::new()),
        }
    }

    /// Whether the gate checks anything at all
    pub fn enabled(&self) -> bool {
        self.password_digest.is_some()
    }

    /// Check a login attempt; on success issue a session token
    pub fn login(&self, password: &str) -> ApiResult<String> {
        if let Some(expected) = &self.password_digest {
            let provided: [u8; 32] = Sha256::digest(password.as_bytes()).into();
            if &provided != expected {
                warn!("Admin login rejected: wrong password");
                return Err(ApiError::Unauthorized("wrong password".to_string()));
            }
        }

        let token = Uuid::new_v4().simple().to_string();
        self.sessions.write().unwrap().insert(token.clone());
        info!("Admin session opened");
        Ok(token)
    }

    /// Invalidate one session token
    pub fn logout(&self, token: &str) {
        self.sessions.write().unwrap().remove(token);
    }

    /// Whether a request token grants access
    pub fn authorize(&self, token: Option<&str>) -> bool {
        if !self.enabled() {
            return true;
        }
        match token {
            Some(token) => self.sessions.read().unwrap().contains(token),
            None => false,
        }
    }
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Login response carrying the session token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = state.auth.login(&payload.password)?;
    Ok(Json(LoginResponse { token }))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, request: Request) -> Json<serde_json::Value> {
    if let Some(token) = token_from_request(&request) {
        state.auth.logout(&token);
    }
    Json(serde_json::json!({ "success": true }))
}

/// Authentication middleware for protected routes
///
/// Returns 401 Unauthorized when the gate is enabled and the request
/// carries no live session token. Health, login, and SSE routes do not use
/// this middleware.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = token_from_request(&request);
    if !state.auth.authorize(token.as_deref()) {
        return Err(ApiError::Unauthorized(
            "missing or expired admin session".to_string(),
        ));
    }
    Ok(next.run(request).await)
}

fn token_from_request(request: &Request) -> Option<String> {
    request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
