//! The user directory: signup and authentication, plus the handlers for
//! the home, signup, login and logout routes.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use warbler_db::models::UserRow;
use warbler_db::{Database, StoreError};
use warbler_types::CURR_USER_KEY;
use warbler_types::api::{LoginForm, SignupForm};

use crate::error::ApiError;
use crate::{credentials, pages, session};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub secret_key: String,
}

/// Create a user: hash the raw password (when present) and persist.
/// A missing required field or a taken username/email surfaces from the
/// store as [`StoreError::Integrity`].
pub fn signup(
    db: &Database,
    username: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
    image_url: Option<&str>,
) -> Result<UserRow, ApiError> {
    let hash = match password {
        Some(raw) => {
            Some(credentials::hash_password(raw).map_err(|e| ApiError::Internal(e.to_string()))?)
        }
        None => None,
    };
    Ok(db.create_user(None, username, email, hash.as_deref(), image_url)?)
}

/// Look up by username and verify the password. An unknown username and a
/// wrong password are indistinguishable: both return `Ok(None)`, never an
/// error, so callers cannot enumerate usernames by failure type.
pub fn authenticate(
    db: &Database,
    username: &str,
    password: &str,
) -> Result<Option<UserRow>, ApiError> {
    let Some(user) = db.get_user_by_username(username)? else {
        return Ok(None);
    };
    if credentials::verify_password(password, &user.password) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

// -- Handlers --

pub async fn home(jar: CookieJar) -> (CookieJar, Html<String>) {
    let flash = jar
        .get(session::FLASH_KEY)
        .map(|cookie| cookie.value().to_string());
    let jar = jar.remove(Cookie::build(session::FLASH_KEY).path("/"));
    (jar, Html(pages::home_page(flash.as_deref())))
}

pub async fn show_signup(jar: CookieJar) -> (CookieJar, Html<String>) {
    let flash = jar
        .get(session::FLASH_KEY)
        .map(|cookie| cookie.value().to_string());
    let jar = jar.remove(Cookie::build(session::FLASH_KEY).path("/"));
    (jar, Html(pages::signup_page(flash.as_deref())))
}

/// Create the account and the session in one step, then land on the new
/// profile. Integrity violations bounce back to the signup form with a
/// flash instead of erroring.
pub async fn post_signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<Response, ApiError> {
    match signup(
        &state.db,
        form.username.as_deref(),
        form.email.as_deref(),
        form.password.as_deref(),
        form.image_url.as_deref(),
    ) {
        Ok(user) => {
            let token = session::create_session_token(&state.secret_key, user.id, &user.username)?;
            let jar = jar.add(session::session_cookie(token));
            Ok((jar, session::redirect_to(&format!("/users/{}", user.id))).into_response())
        }
        Err(ApiError::Store(StoreError::Integrity(_))) => {
            let jar = jar.add(session::flash_cookie("Username or email already taken."));
            Ok((jar, session::redirect_to("/signup")).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn show_login(jar: CookieJar) -> (CookieJar, Html<String>) {
    let flash = jar
        .get(session::FLASH_KEY)
        .map(|cookie| cookie.value().to_string());
    let jar = jar.remove(Cookie::build(session::FLASH_KEY).path("/"));
    (jar, Html(pages::login_page(flash.as_deref())))
}

pub async fn post_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    match authenticate(&state.db, &form.username, &form.password)? {
        Some(user) => {
            let token = session::create_session_token(&state.secret_key, user.id, &user.username)?;
            let jar = jar.add(session::session_cookie(token));
            Ok((jar, session::redirect_to("/")).into_response())
        }
        None => {
            let jar = jar.add(session::flash_cookie("Invalid credentials."));
            Ok((jar, session::redirect_to("/login")).into_response())
        }
    }
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Response) {
    let jar = jar
        .remove(Cookie::build(CURR_USER_KEY).path("/"))
        .add(session::flash_cookie("You have been logged out."));
    (jar, session::redirect_to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_then_authenticate() {
        let db = Database::open_in_memory().unwrap();
        let user = signup(
            &db,
            Some("tester3"),
            Some("test3@email.com"),
            Some("testpw"),
            None,
        )
        .unwrap();

        let found = authenticate(&db, "tester3", "testpw")
            .unwrap()
            .expect("valid credentials should authenticate");
        assert_eq!(found.id, user.id);
        assert_eq!(found.email, "test3@email.com");
    }

    #[test]
    fn password_is_stored_hashed() {
        let db = Database::open_in_memory().unwrap();
        let user = signup(
            &db,
            Some("tester3"),
            Some("test3@email.com"),
            Some("testpw"),
            None,
        )
        .unwrap();
        assert_ne!(user.password, "testpw");
    }

    #[test]
    fn wrong_password_and_unknown_username_are_indistinguishable() {
        let db = Database::open_in_memory().unwrap();
        signup(
            &db,
            Some("tester2"),
            Some("test2@email.com"),
            Some("testpw"),
            None,
        )
        .unwrap();

        assert!(authenticate(&db, "tester2", "failtest").unwrap().is_none());
        assert!(authenticate(&db, "failtest", "testpw").unwrap().is_none());
    }

    #[test]
    fn signup_missing_fields_is_integrity_error() {
        let db = Database::open_in_memory().unwrap();
        let cases: [(Option<&str>, Option<&str>, Option<&str>); 3] = [
            (None, Some("test4@email.com"), Some("testpw")),
            (Some("emailtest"), None, Some("testpw")),
            (Some("passwordtest"), Some("test4@email.com"), None),
        ];
        for (username, email, password) in cases {
            let err = signup(&db, username, email, password, None).unwrap_err();
            assert!(matches!(err, ApiError::Store(StoreError::Integrity(_))));
        }
    }

    #[test]
    fn signup_duplicate_username_is_integrity_error() {
        let db = Database::open_in_memory().unwrap();
        signup(&db, Some("test"), Some("test@email.com"), Some("pw"), None).unwrap();
        let err = signup(&db, Some("test"), Some("other@email.com"), Some("pw"), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::Store(StoreError::Integrity(_))));
    }
}
