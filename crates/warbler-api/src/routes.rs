//! Router assembly: public routes plus the session-gated group.

use axum::routing::{get, post};
use axum::{Router, middleware};

use crate::auth::{self, AppState};
use crate::{messages, session, users};

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(auth::home))
        .route("/signup", get(auth::show_signup).post(auth::post_signup))
        .route("/login", get(auth::show_login).post(auth::post_login))
        .route("/logout", post(auth::logout))
        .route("/messages/{id}", get(messages::show_message))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route(
            "/messages/new",
            get(messages::new_message_form).post(messages::create_message),
        )
        .route("/messages/{id}/delete", post(messages::delete_message))
        .route("/users/profile", get(users::profile_form))
        .route("/users/{id}", get(users::show_user))
        .route("/users/{id}/following", get(users::following_page))
        .route("/users/{id}/followers", get(users::followers_page))
        .route("/users/{id}/likes", get(users::likes_page))
        .route("/users/add_like/{message_id}", post(users::add_like))
        .route("/users/follow/{id}", post(users::follow_user))
        .route("/users/stop_following/{id}", post(users::stop_following))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}
