//! User pages: profile, follower/following lists, likes, and the
//! follow/like actions.

use axum::Extension;
use axum::extract::{Path, State};
use axum::response::{Html, Response};
use tracing::error;

use warbler_db::StoreError;
use warbler_types::api::Claims;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::{pages, session};

pub async fn show_user(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    // Profile listing is the heaviest read; keep it off the async runtime
    let db = state.clone();
    let (user, messages) = tokio::task::spawn_blocking(move || {
        let user = db.db.require_user(id)?;
        let messages = db.db.messages_for_user(id)?;
        Ok::<_, StoreError>((user, messages))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(e.to_string())
    })??;

    Ok(Html(pages::profile_page(&user, &messages)))
}

pub async fn following_page(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let user = state.db.require_user(id)?;
    let following = state.db.following_of(id)?;
    Ok(Html(pages::user_list_page("Following", &user, &following)))
}

pub async fn followers_page(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let user = state.db.require_user(id)?;
    let followers = state.db.followers_of(id)?;
    Ok(Html(pages::user_list_page("Followers", &user, &followers)))
}

pub async fn likes_page(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let user = state.db.require_user(id)?;
    let liked = state.db.messages_liked_by(id)?;
    Ok(Html(pages::liked_messages_page(&user, &liked)))
}

/// Editable profile form for the session user.
pub async fn profile_form(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Html<String>, ApiError> {
    let user = state.db.require_user(claims.sub)?;
    let count = state.db.count_messages_for_user(claims.sub)?;
    Ok(Html(pages::edit_profile_page(&user, count)))
}

/// Toggle a like on a message. Liking your own warble is rejected here at
/// the handler level; the data model itself does not forbid it.
pub async fn add_like(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let message = state.db.require_message(message_id)?;
    if message.user_id == claims.sub {
        return Err(ApiError::Unauthorized);
    }
    state.db.toggle_like(claims.sub, message_id)?;
    Ok(session::redirect_to("/"))
}

pub async fn follow_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.db.require_user(id)?;
    state.db.follow(claims.sub, id)?;
    Ok(session::redirect_to(&format!(
        "/users/{}/following",
        claims.sub
    )))
}

pub async fn stop_following(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.db.unfollow(claims.sub, id)?;
    Ok(session::redirect_to(&format!(
        "/users/{}/following",
        claims.sub
    )))
}
