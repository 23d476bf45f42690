use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::graphql::FetchError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::Validation(_) => ApiError::BadRequest(value.to_string()),
            FetchError::NotFound(_) => ApiError::NotFound(value.to_string()),
            FetchError::Http(err) => {
                error!("HTTP error: {err}");
                ApiError::Internal("Failed to fetch events".into())
            }
            FetchError::GraphQl(_) | FetchError::MissingData => {
                error!("Upstream error: {value}");
                ApiError::Internal("Failed to fetch events".into())
            }
        }
    }
}
