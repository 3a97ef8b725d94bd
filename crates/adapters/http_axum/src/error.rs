//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use thermopanel_domain::error::PanelError;

/// JSON error body returned on failure.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`PanelError`] to an HTTP response with appropriate status code.
pub struct ApiError(PanelError);

impl From<PanelError> for ApiError {
    fn from(err: PanelError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PanelError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PanelError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            PanelError::Host(err) => {
                tracing::error!(error = %err, "host error");
                (
                    StatusCode::BAD_GATEWAY,
                    "host controller unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
