use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use bloglist_api::auth::password::hash_password;
use bloglist_api::config::ServerConfig;
use bloglist_api::router::build_app_router;
use bloglist_api::state::AppState;
use bloglist_db::models::blog::{Blog, CreateBlog};
use bloglist_db::models::user::{CreateUser, User};
use bloglist_db::repositories::{BlogRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// The pool comes from `#[sqlx::test]`, so the configured database URL
/// is never dialled; CORS matches the dev default.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: "postgres://unused-in-tests".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    request(app, Method::GET, uri, None, None).await
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    request(app, Method::POST, uri, Some(body), None).await
}

/// Send a POST request with a JSON body and a session cookie.
pub async fn post_json_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    request(app, Method::POST, uri, Some(body), Some(cookie)).await
}

/// Send a PUT request with a JSON body and a session cookie.
pub async fn put_json_cookie(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    request(app, Method::PUT, uri, Some(body), Some(cookie)).await
}

/// Send a PUT request with a JSON body and no cookie.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    request(app, Method::PUT, uri, Some(body), None).await
}

/// Send a DELETE request without a cookie.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    request(app, Method::DELETE, uri, None, None).await
}

/// Send a DELETE request with a session cookie.
pub async fn delete_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    request(app, Method::DELETE, uri, None, Some(cookie)).await
}

async fn request(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(CONTENT_TYPE, "application/json");
    }
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user directly in the database, returning the row and the
/// plaintext password used.
pub async fn create_test_user(pool: &PgPool, username: &str, name: &str) -> (User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        name: name.to_string(),
        password_hash: hashed,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Insert a blog directly in the database.
pub async fn seed_blog(pool: &PgPool, user_id: i64, title: &str, likes: i32) -> Blog {
    let input = CreateBlog {
        title: title.to_string(),
        author: "Edsger W. Dijkstra".to_string(),
        url: format!("https://example.com/{}", title.replace(' ', "-")),
        likes,
        year: 2021,
        user_id,
    };
    BlogRepo::create(pool, &input)
        .await
        .expect("blog creation should succeed")
}

/// Log in via the API and return the session cookie pair
/// (`session_token=<uuid>`) to present on subsequent requests.
pub async fn login_for_cookie(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

/// Extract the session cookie pair from a login response's `Set-Cookie`
/// header.
pub fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login response must set a session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}
