//! Message ledger routes: show, compose, create and delete.

use axum::extract::{Path, State};
use axum::response::{Html, Response};
use axum::{Extension, Form};
use tracing::error;

use warbler_types::api::{Claims, NewMessageForm};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::{pages, session};

pub async fn show_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let message = state.db.require_message(id)?;
    let author = state.db.require_user(message.user_id)?;
    Ok(Html(pages::message_page(&message, &author)))
}

pub async fn new_message_form(Extension(claims): Extension<Claims>) -> Html<String> {
    Html(pages::new_message_page(&claims.username))
}

pub async fn create_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Form(form): Form<NewMessageForm>,
) -> Result<Response, ApiError> {
    // Run the blocking DB insert off the async runtime
    let db = state.clone();
    let user_id = claims.sub;
    tokio::task::spawn_blocking(move || db.db.create_message(None, &form.text, user_id, None))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.to_string())
        })??;

    Ok(session::redirect_to(&format!("/users/{}", claims.sub)))
}

/// Only the owner may delete; anyone else gets the unauthorized flash
/// redirect and the message stays put.
pub async fn delete_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    state.db.delete_message(id, claims.sub)?;
    Ok(session::redirect_to(&format!("/users/{}", claims.sub)))
}
