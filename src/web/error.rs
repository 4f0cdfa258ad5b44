use crate::utils::error::PrunError;
use crate::web::views;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("FIO refused access to {username}")]
    AccessDenied { username: String },

    #[error(transparent)]
    Upstream(#[from] PrunError),
}

impl PageError {
    /// A 401 from FIO while loading `username`'s fleet gets its own page.
    pub fn for_user(err: PrunError, username: &str) -> Self {
        match err.upstream_status() {
            Some(401) => PageError::AccessDenied {
                username: username.to_string(),
            },
            _ => PageError::Upstream(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PageError::AccessDenied { .. } => StatusCode::UNAUTHORIZED,
            PageError::Upstream(PrunError::UpstreamStatus { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            PageError::Upstream(PrunError::ApiError(_))
            | PageError::Upstream(PrunError::SerializationError(_)) => StatusCode::BAD_GATEWAY,
            PageError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            PageError::AccessDenied { username } => {
                tracing::info!("🔒 FIO denied access to {}", username);
                views::shipping::render_access_denied(username)
            }
            PageError::Upstream(err) => {
                tracing::warn!(
                    "❌ {} ({:?}/{:?}): {}",
                    err.user_friendly_message(),
                    err.category(),
                    err.severity(),
                    err
                );
                views::error_page(status.as_u16(), status.canonical_reason().unwrap_or_default())
            }
        };

        (status, Html(body)).into_response()
    }
}
