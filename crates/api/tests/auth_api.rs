//! HTTP-level integration tests for login, logout, and session
//! resolution.
//!
//! The notable behaviours under test: invalid credentials are never
//! distinguishable, login hands out a cookie-carried opaque token, and
//! logout revokes every session the user holds, not just the caller's.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_cookie, login_for_cookie, post_json, post_json_cookie,
    session_cookie,
};
use sqlx::PgPool;
use uuid::Uuid;

use bloglist_db::repositories::SessionRepo;

/// A valid blog body for exercising protected routes.
fn blog_body() -> serde_json::Value {
    serde_json::json!({
        "title": "First class tests",
        "author": "Robert C. Martin",
        "url": "http://blog.cleancoder.com/uncle-bob/2017/05/05/TestDefinitions.html",
    })
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with the user's public summary and an
/// HttpOnly session cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success_sets_cookie_and_returns_summary(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "root@example.com", "root").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "root@example.com", "password": password });
    let response = post_json(app, "/api/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login must set a session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("session_token="));
    assert!(set_cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["username"], "root@example.com");
    assert_eq!(json["name"], "root");
    // The summary must never leak credential material.
    assert!(json.get("password_hash").is_none());
}

/// The token handed out by login resolves back to the user that logged in.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_token_resolves_to_the_user(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "root@example.com", "root").await;
    let app = common::build_test_app(pool.clone());

    let cookie = login_for_cookie(app, "root@example.com", &password).await;
    let token: Uuid = cookie
        .strip_prefix("session_token=")
        .unwrap()
        .parse()
        .expect("token must be a UUID");

    let session = SessionRepo::find_by_token(&pool, token)
        .await
        .expect("lookup should succeed")
        .expect("session must exist");
    assert_eq!(session.user_id, user.id);
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_returns_401(pool: PgPool) {
    let (_user, _password) = create_test_user(&pool, "root@example.com", "root").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "root@example.com", "password": "incorrect" });
    let response = post_json(app, "/api/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An unknown username fails with the exact same status and body as a
/// wrong password, so callers cannot enumerate usernames.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_failures_are_indistinguishable(pool: PgPool) {
    let (_user, _password) = create_test_user(&pool, "root@example.com", "root").await;
    let app = common::build_test_app(pool);

    let wrong_password = post_json(
        app.clone(),
        "/api/login",
        serde_json::json!({ "username": "root@example.com", "password": "incorrect" }),
    )
    .await;
    let unknown_user = post_json(
        app,
        "/api/login",
        serde_json::json!({ "username": "ghost@example.com", "password": "incorrect" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = body_json(wrong_password).await;
    let unknown_user = body_json(unknown_user).await;
    assert_eq!(wrong_password, unknown_user);
}

/// A failed login leaves no session behind -- no partial state.
#[sqlx::test(migrations = "../db/migrations")]
async fn failed_login_creates_no_session(pool: PgPool) {
    let (user, _password) = create_test_user(&pool, "root@example.com", "root").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "username": "root@example.com", "password": "incorrect" });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let tokens = SessionRepo::find_tokens_for_user(&pool, user.id)
        .await
        .expect("enumeration should succeed");
    assert!(tokens.is_empty(), "no session may exist after failed login");
}

/// Concurrent logins produce distinct, independently resolvable tokens.
#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_logins_get_distinct_sessions(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "root@example.com", "root").await;
    let app = common::build_test_app(pool.clone());

    let c1 = login_for_cookie(app.clone(), "root@example.com", &password).await;
    let c2 = login_for_cookie(app, "root@example.com", &password).await;
    assert_ne!(c1, c2, "each login must create its own session");

    let tokens = SessionRepo::find_tokens_for_user(&pool, user.id)
        .await
        .expect("enumeration should succeed");
    assert_eq!(tokens.len(), 2);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// Logging out with one cookie revokes every session the user holds:
/// a second login's cookie stops working too.
#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_all_sessions(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "root@example.com", "root").await;
    let app = common::build_test_app(pool.clone());

    let c1 = login_for_cookie(app.clone(), "root@example.com", &password).await;
    let c2 = login_for_cookie(app.clone(), "root@example.com", &password).await;

    let response = delete_cookie(app.clone(), "/api/logout", &c1).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The logout response clears the caller's cookie.
    let cleared = session_cookie(&response);
    assert_eq!(cleared, "session_token=");

    // The other device's cookie no longer opens any protected route.
    let response = post_json_cookie(app, "/api/blogs", blog_body(), &c2).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // No session rows remain for the user.
    let tokens = SessionRepo::find_tokens_for_user(&pool, user.id)
        .await
        .expect("enumeration should succeed");
    assert!(tokens.is_empty(), "logout must destroy every session");
}

/// Logout is itself a protected route.
#[sqlx::test(migrations = "../db/migrations")]
async fn logout_without_session_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::delete(app, "/api/logout").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A cookie from a logged-out session fails every protected route.
#[sqlx::test(migrations = "../db/migrations")]
async fn logged_out_cookie_is_rejected(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "root@example.com", "root").await;
    let app = common::build_test_app(pool);

    let cookie = login_for_cookie(app.clone(), "root@example.com", &password).await;
    let response = delete_cookie(app.clone(), "/api/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_cookie(app.clone(), "/api/blogs", blog_body(), &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Logging out twice with the same cookie is rejected the same way.
    let response = delete_cookie(app, "/api/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Session extractor edge cases
// ---------------------------------------------------------------------------

/// A cookie that is not even a UUID is rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_session_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response =
        post_json_cookie(app, "/api/blogs", blog_body(), "session_token=not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A well-formed token that matches no session is rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_session_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let cookie = format!("session_token={}", Uuid::new_v4());
    let response = post_json_cookie(app, "/api/blogs", blog_body(), &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
