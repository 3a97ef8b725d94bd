//! Status widget fragment.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use thermopanel_app::ports::HostClient;
use thermopanel_domain::id::DeviceId;

use super::render;
use crate::error::ApiError;
use crate::state::AppState;

/// Status widget template — current temperature plus the status line.
#[derive(Template)]
#[template(path = "widget.html")]
pub struct WidgetTemplate {
    temperature: String,
    status: String,
}

impl IntoResponse for WidgetTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /devices/{id}/widget` — dashboard summary fragment.
pub async fn show<H: HostClient + 'static>(
    State(state): State<AppState<H>>,
    Path(id): Path<u32>,
) -> Result<WidgetTemplate, ApiError> {
    let view = state
        .status_service
        .summarize(DeviceId::new(id))
        .await?;

    Ok(WidgetTemplate {
        temperature: view.temperature,
        status: view.status,
    })
}
