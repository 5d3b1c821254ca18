use crate::{
    db::users as db_users,
    error::AppError,
    middleware::auth::{issue_token, removal_cookie, session_cookie, AdminSession},
    models::user::*,
    routes::photos::AppState,
};
use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    // Find the admin user by username
    let user = db_users::find_by_username(&state.pool, &req.username)
        .await?
        .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Invalid credentials".to_string()))?;

    // Issue the session token and install it as an HTTP-only cookie
    let token = issue_token(&state.session_secret);
    let cookie = HeaderValue::from_str(&session_cookie(&token))
        .map_err(|e| AppError::Internal(format!("Invalid cookie value: {}", e)))?;

    let mut response = Json(json!({ "success": true })).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

pub async fn logout() -> Result<Response, AppError> {
    // Stateless sessions: logout just deletes the client cookie.
    // A captured token stays valid until it expires; early revocation
    // requires rotating SESSION_SECRET.
    let cookie = HeaderValue::from_str(&removal_cookie())
        .map_err(|e| AppError::Internal(format!("Invalid cookie value: {}", e)))?;

    let mut response = Json(json!({ "success": true })).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

pub async fn check(_session: AdminSession) -> Json<Value> {
    // AdminSession already rejected the request with 401 if the cookie
    // was missing or invalid.
    Json(json!({ "authenticated": true }))
}
