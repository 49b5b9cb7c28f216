use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{ApiResponse, catalog::CatalogError, stream::StreamError};

/// Errors surfaced by the HTTP API
#[derive(Debug, thiserror::Error)]
pub enum VoidError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl VoidError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(_) => StatusCode::BAD_GATEWAY,
            Self::Stream(StreamError::NotFound) => StatusCode::NOT_FOUND,
            Self::Stream(StreamError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
            Self::Stream(StreamError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Stream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for VoidError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(%status, "{message}");
        } else {
            tracing::debug!(%status, "{message}");
        }

        let body = ApiResponse::<()> {
            code: status.as_u16(),
            message,
            data: None,
        };

        (status, Json(body)).into_response()
    }
}
