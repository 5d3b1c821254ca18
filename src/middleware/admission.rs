use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::middleware::auth::session_from_cookies;
use crate::routes::photos::AppState;

/// Admission rule for admin pages, applied before any route is reached.
///
/// - `/admin/login` with a valid session: the admin is already logged in,
///   send them to the dashboard instead.
/// - any other `/admin...` path without a valid session: send to the login
///   page.
/// - everything else passes through untouched — public pages and the
///   read-only content API are intentionally unauthenticated, and mutating
///   API routes enforce their own session check via the `AdminSession`
///   extractor.
pub async fn admission_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if path == "/admin" || path.starts_with("/admin/") {
        let cookie_header = request
            .headers()
            .get(COOKIE)
            .and_then(|value| value.to_str().ok());
        let authenticated = session_from_cookies(cookie_header, &state.session_secret);

        if path == "/admin/login" {
            if authenticated {
                return Redirect::temporary("/admin/dashboard").into_response();
            }
        } else if !authenticated {
            return Redirect::temporary("/admin/login").into_response();
        }
    }

    next.run(request).await
}
