//! End-to-end tests for the HTTP API layer.
//!
//! Each test builds the full router over a fresh in-memory SQLite pool and
//! drives it with `tower::ServiceExt::oneshot` — no listening server needed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http_body_util::BodyExt;
use tower::ServiceExt;

use aperture::{db, AppState};

const SECRET: &str = "e2e-secret";
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

async fn create_app() -> Router {
    // A single connection, because "sqlite::memory:" opens a separate
    // database per connection.
    let opts = "sqlite::memory:"
        .parse::<sqlx::sqlite::SqliteConnectOptions>()
        .unwrap()
        .foreign_keys(false);
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    // Seed the admin user the same way main() does at startup.
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(ADMIN_PASSWORD.as_bytes(), &salt)
        .unwrap()
        .to_string();
    let id = uuid::Uuid::new_v4().to_string();
    db::users::create_user(&pool, &id, ADMIN_USERNAME, &password_hash)
        .await
        .unwrap();

    let uploads_path = std::env::temp_dir()
        .join(format!("aperture-test-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();

    aperture::app(AppState {
        pool,
        session_secret: SECRET.to_string(),
        uploads_path,
    })
}

async fn body_to_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Logs in with the seeded admin credentials and returns the
/// `auth-token=<value>` pair to send back as a `Cookie` header.
async fn login_cookie(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap();
    set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim()
        .to_string()
}

#[tokio::test]
async fn login_sets_http_only_session_cookie() {
    let app = create_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("auth-token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=86400"));

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_user() {
    let app = create_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "username": ADMIN_USERNAME, "password": "anything" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "username": "nobody", "password": ADMIN_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_to_json(response.into_body()).await;
    assert!(body["error"].is_object());
}

#[tokio::test]
async fn check_reflects_session_state() {
    let app = create_app().await;

    // no cookie at all
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/auth/check").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // unrelated cookies only
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/check")
                .header(header::COOKIE, "theme=dark; lang=ko")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // valid session
    let cookie = login_cookie(&app).await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/check")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["authenticated"], true);
}

#[tokio::test]
async fn expired_token_is_not_a_session() {
    let app = create_app().await;

    // a token issued 25 hours ago, encoded exactly like the server does
    let issued = chrono::Utc::now().timestamp_millis() - 25 * 60 * 60 * 1000;
    let stale = STANDARD.encode(format!("{}-{}", issued, SECRET));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/check")
                .header(header::COOKIE, format!("auth-token={}", stale))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = create_app().await;
    let _cookie = login_cookie(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("auth-token=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    // the browser dropped the cookie, so a following check is unauthenticated
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/auth/check").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn category_creation_requires_session_and_rejects_duplicates() {
    let app = create_app().await;

    // unauthenticated create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/categories",
            serde_json::json!({ "name": "Travel" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = login_cookie(&app).await;
    let authed = |body: serde_json::Value| {
        Request::builder()
            .method("POST")
            .uri("/api/categories")
            .header("content-type", "application/json")
            .header(header::COOKIE, &cookie)
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    };

    // authenticated create
    let response = app
        .clone()
        .oneshot(authed(serde_json::json!({ "name": "Travel", "description": "on the road" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["name"], "Travel");

    // duplicate name conflicts
    let response = app
        .clone()
        .oneshot(authed(serde_json::json!({ "name": "Travel" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // missing name is a validation error
    let response = app
        .clone()
        .oneshot(authed(serde_json::json!({ "description": "no name" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // the public listing shows the single created category
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/categories").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

fn multipart_upload(
    cookie: Option<&str>,
    filename: Option<&str>,
    title: Option<&str>,
    category_id: Option<&str>,
) -> Request<Body> {
    const BOUNDARY: &str = "e2e-test-boundary";
    let mut body = String::new();

    if let Some(filename) = filename {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: image/jpeg\r\n\r\nnot-really-a-jpeg\r\n",
            BOUNDARY, filename
        ));
    }
    for (name, value) in [
        ("title", title),
        ("categoryId", category_id),
        ("description", Some("taken at dusk")),
        ("backgroundColor", Some("#1a1a2e")),
    ] {
        if let Some(value) = value {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            ));
        }
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));

    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/photos")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

#[tokio::test]
async fn photo_upload_update_delete_flow() {
    let app = create_app().await;
    let cookie = login_cookie(&app).await;

    // upload without a session
    let response = app
        .clone()
        .oneshot(multipart_upload(None, Some("sunset.jpg"), Some("Sunset"), Some("cat-1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // upload without a title
    let response = app
        .clone()
        .oneshot(multipart_upload(Some(cookie.as_str()), Some("sunset.jpg"), None, Some("cat-1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // successful upload
    let response = app
        .clone()
        .oneshot(multipart_upload(Some(cookie.as_str()), Some("sunset.jpg"), Some("Sunset"), Some("cat-1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let photo = body_to_json(response.into_body()).await;
    let id = photo["id"].as_str().unwrap().to_string();
    assert_eq!(photo["title"], "Sunset");
    assert_eq!(photo["imageUrl"], "/uploads/sunset.jpg");
    assert_eq!(photo["createdAt"], photo["updatedAt"]);

    // public read
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/photos/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // partial update changes only the supplied field
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/photos/{}", id))
                .header("content-type", "application/json")
                .header(header::COOKIE, &cookie)
                .body(Body::from(r#"{"title":"Sunrise"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_to_json(response.into_body()).await;
    assert_eq!(updated["title"], "Sunrise");
    assert_eq!(updated["description"], photo["description"]);
    assert_eq!(updated["createdAt"], photo["createdAt"]);

    // unknown fields are rejected at the boundary
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/photos/{}", id))
                .header("content-type", "application/json")
                .header(header::COOKIE, &cookie)
                .body(Body::from(r#"{"id":"forged","title":"X"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    // delete, then the photo is gone
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/photos/{}", id))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/photos/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_photos_listing_is_public_and_checks_the_category() {
    let app = create_app().await;
    let cookie = login_cookie(&app).await;

    // unknown category → 404
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/categories/no-such-id/photos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // create a category and upload a photo into it
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/categories")
                .header("content-type", "application/json")
                .header(header::COOKIE, &cookie)
                .body(Body::from(r#"{"name":"Travel"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    let category = body_to_json(response.into_body()).await;
    let category_id = category["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(multipart_upload(
            Some(cookie.as_str()),
            Some("dunes.jpg"),
            Some("Dunes"),
            Some(category_id.as_str()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // the per-category listing is public and contains the photo
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/categories/{}/photos", category_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let photos = body_to_json(response.into_body()).await;
    assert_eq!(photos.as_array().unwrap().len(), 1);
    assert_eq!(photos[0]["title"], "Dunes");
}

#[tokio::test]
async fn admin_paths_redirect_unauthenticated_browsers() {
    let app = create_app().await;

    // dashboard without a session → login page
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/admin/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/admin/login");

    // login page without a session passes through (no redirect loop)
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/admin/login").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    // login page with a valid session → dashboard
    let cookie = login_cookie(&app).await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/login")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/admin/dashboard");

    // non-admin paths are never intercepted
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
