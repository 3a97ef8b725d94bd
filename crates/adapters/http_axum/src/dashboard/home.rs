//! Device index page.

use askama::Template;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use thermopanel_app::ports::HostClient;

use super::render;
use crate::error::ApiError;
use crate::state::AppState;

/// One row in the device index.
pub struct DeviceRow {
    pub id: String,
    pub label: String,
}

/// Index page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    devices: Vec<DeviceRow>,
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /` — list known devices with links to their fragments.
pub async fn index<H: HostClient + 'static>(
    State(state): State<AppState<H>>,
) -> Result<HomeTemplate, ApiError> {
    let devices = state
        .host
        .list_devices()
        .await?
        .into_iter()
        .map(|descriptor| DeviceRow {
            id: descriptor.id.to_string(),
            label: descriptor.friendly_name(),
        })
        .collect();

    Ok(HomeTemplate { devices })
}
