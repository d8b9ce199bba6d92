#![allow(dead_code)]

//! Shared helpers for the view tests: an in-memory app, forged session
//! cookies, and a tiny request/redirect driver over `tower::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use warbler_api::auth::{AppState, AppStateInner};
use warbler_api::{credentials, routes, session};
use warbler_db::Database;
use warbler_types::CURR_USER_KEY;

pub const SECRET: &str = "test-secret";
pub const TESTER1: i64 = 10000000;
pub const TESTER2: i64 = 10000001;
pub const TESTER3: i64 = 10000002;
pub const TESTER4: i64 = 10000003;

pub fn test_app() -> (AppState, Router) {
    let state: AppState = Arc::new(AppStateInner {
        db: Database::open_in_memory().unwrap(),
        secret_key: SECRET.into(),
    });
    let app = routes::router(state.clone());
    (state, app)
}

/// Seed the four standard users with a shared hashed password ("testpw").
pub fn seed_users(state: &AppState) {
    let hash = credentials::hash_password("testpw").unwrap();
    let users = [
        (TESTER1, "tester1", "test@email.com"),
        (TESTER2, "tester2", "test2@email.com"),
        (TESTER3, "followertester", "test3@email.com"),
        (TESTER4, "nofollow", "test4@email.com"),
    ];
    for (id, username, email) in users {
        state
            .db
            .create_user(Some(id), Some(username), Some(email), Some(&hash), None)
            .unwrap();
    }
}

/// Forge the session cookie a logged-in browser would carry.
pub fn session_for(user_id: i64, username: &str) -> String {
    let token = session::create_session_token(SECRET, user_id, username).unwrap();
    format!("{}={}", CURR_USER_KEY, token)
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(res: Response<Body>) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// First Set-Cookie pair on a response, trimmed to a Cookie header value.
pub fn first_set_cookie(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).to_string())
}

/// Follow one redirect hop, carrying along any cookie the redirect set
/// (flash or session) the way a browser would.
pub async fn follow_redirect(app: &Router, res: Response<Body>) -> Response<Body> {
    assert!(
        res.status().is_redirection(),
        "expected a redirect, got {}",
        res.status()
    );
    let location = res
        .headers()
        .get(header::LOCATION)
        .expect("redirect without Location header")
        .to_str()
        .unwrap()
        .to_string();
    let cookie = first_set_cookie(&res);
    get(app, &location, cookie.as_deref()).await
}
