use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use warbler_db::StoreError;

use crate::{pages, session};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request needs a session (or ownership) it does not have. This is
    /// a handled control path: it renders as a redirect home with an
    /// "Access unauthorized." flash, never as a server error.
    #[error("access unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized | ApiError::Store(StoreError::Forbidden) => {
                session::unauthorized_redirect()
            }
            ApiError::NotFound | ApiError::Store(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response()
            }
            ApiError::Store(StoreError::Integrity(msg)) => {
                (StatusCode::BAD_REQUEST, Html(pages::error_page(&msg))).into_response()
            }
            other => {
                tracing::error!("request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(pages::error_page("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}
