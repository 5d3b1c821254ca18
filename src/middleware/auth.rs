use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;

use crate::routes::photos::AppState;

/// Session cookie name, shared by the gate, the handlers and the admission layer.
pub const AUTH_COOKIE: &str = "auth-token";

/// Token lifetime: 24 hours, in milliseconds (age check) and seconds (cookie Max-Age).
pub const TOKEN_MAX_AGE_MS: i64 = 24 * 60 * 60 * 1000;
pub const COOKIE_MAX_AGE_SECS: i64 = 24 * 60 * 60;

/// Issues a new session token: base64 of `"<issue-millis>-<secret>"`.
///
/// The token is self-contained — validity is recomputed from its own
/// content plus the configured secret, with no server-side session table.
/// Rotating the secret is the only way to revoke tokens before expiry.
pub fn issue_token(secret: &str) -> String {
    let issued_at = chrono::Utc::now().timestamp_millis();
    STANDARD.encode(format!("{}-{}", issued_at, secret))
}

/// Verifies a session token. Fails closed: any decode error, malformed
/// structure, mismatched secret or age beyond 24h yields `false`.
///
/// The decoded payload must contain exactly two dash-delimited parts;
/// anything else is invalid. The age check is a plain millisecond
/// difference with no clock-skew tolerance.
pub fn verify_token(token: &str, secret: &str) -> bool {
    let Ok(decoded) = STANDARD.decode(token) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };

    let parts: Vec<&str> = decoded.split('-').collect();
    if parts.len() != 2 {
        return false;
    }
    let Ok(issued_at) = parts[0].parse::<i64>() else {
        return false;
    };

    if chrono::Utc::now().timestamp_millis() - issued_at > TOKEN_MAX_AGE_MS {
        return false;
    }
    parts[1] == secret
}

/// Decides authentication from a raw `Cookie` header value.
///
/// Scans the header the way the browser sends it: split on `;`, trim each
/// entry, find the one starting with `auth-token=`, take everything after
/// the first `=`. No header, no matching cookie, or an invalid token all
/// mean "not authenticated".
pub fn session_from_cookies(cookie_header: Option<&str>, secret: &str) -> bool {
    let Some(cookies) = cookie_header else {
        return false;
    };

    let token = cookies
        .split(';')
        .find_map(|entry| entry.trim().strip_prefix("auth-token="));

    match token {
        Some(token) => verify_token(token, secret),
        None => false,
    }
}

/// `Set-Cookie` value installing the session cookie.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        AUTH_COOKIE, token, COOKIE_MAX_AGE_SECS
    )
}

/// `Set-Cookie` value deleting the session cookie (Max-Age=0).
/// Deleting an absent cookie is harmless, so logout is idempotent.
pub fn removal_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", AUTH_COOKIE)
}

/// Extractor proving the request carries a valid admin session.
///
/// Mutating API handlers take this as an argument; extraction failure
/// rejects the request with 401 before the handler body runs. API routes
/// therefore re-check the session independently of the /admin admission
/// layer.
#[derive(Debug, Clone)]
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_header = parts
            .headers
            .get(COOKIE)
            .and_then(|value| value.to_str().ok());

        if session_from_cookies(cookie_header, &state.session_secret) {
            Ok(AdminSession)
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    NotAuthenticated,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Not authenticated",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
