//! Cookie-backed sessions.
//!
//! On login or signup the user's id is bound into a signed token stored
//! under the well-known [`CURR_USER_KEY`] cookie; logout clears it. The
//! [`require_session`] middleware treats "cookie present, token valid, and
//! the id resolves to an existing user" as logged in — anything else is
//! anonymous and is redirected home with a flash message.

use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use warbler_types::CURR_USER_KEY;
use warbler_types::api::Claims;

use crate::auth::AppState;
use crate::error::ApiError;

/// Cookie carrying a one-shot flash message, consumed by the home page.
pub const FLASH_KEY: &str = "warbler_flash";

/// Flash text shown for any missing-session or ownership failure.
pub const ACCESS_UNAUTHORIZED: &str = "Access unauthorized.";

const SESSION_TTL_DAYS: i64 = 30;

pub fn create_session_token(
    secret: &str,
    user_id: i64,
    username: &str,
) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(SESSION_TTL_DAYS)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.to_string()))
}

fn decode_session_token(secret: &str, token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((CURR_USER_KEY, token))
        .path("/")
        .http_only(true)
        .build()
}

pub fn flash_cookie(message: &str) -> Cookie<'static> {
    Cookie::build((FLASH_KEY, message.to_string()))
        .path("/")
        .build()
}

/// 302 Found redirect. The browser-session flows here use the classic
/// post/redirect/get pattern with 302 rather than axum's default 303.
pub fn redirect_to(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

/// Redirect home carrying the standard unauthorized flash. Used by the
/// middleware and by handlers that fail an ownership check.
pub fn unauthorized_redirect() -> Response {
    let jar = CookieJar::new().add(flash_cookie(ACCESS_UNAUTHORIZED));
    (jar, redirect_to("/")).into_response()
}

/// Gate for protected routes: resolve the session cookie and stash the
/// claims in request extensions. A missing cookie, an invalid token, or a
/// stale id (the user no longer exists) all read as anonymous.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = jar
        .get(CURR_USER_KEY)
        .and_then(|cookie| decode_session_token(&state.secret_key, cookie.value()));

    let Some(claims) = claims else {
        return Ok(unauthorized_redirect());
    };

    if state.db.get_user(claims.sub)?.is_none() {
        return Ok(unauthorized_redirect());
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
