//! Server-side rendered HTML fragments (no JavaScript).

pub mod config;
pub mod home;
pub mod panel;
pub mod widget;

use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};

use thermopanel_app::ports::HostClient;

use crate::state::AppState;

/// Build the dashboard sub-router for the SSR fragments.
pub fn routes<H: HostClient + 'static>() -> Router<AppState<H>> {
    Router::new()
        .route("/", get(home::index::<H>))
        .route("/devices/{id}/widget", get(widget::show::<H>))
        .route("/devices/{id}/panel", get(panel::show::<H>))
        .route("/devices/{id}/panel/select", post(panel::select::<H>))
        .route("/devices/{id}/panel/setpoint", post(panel::adjust::<H>))
        .route("/devices/{id}/config", get(config::show::<H>))
        .route("/devices/{id}/config/sensors", post(config::save_sensors::<H>))
        .route("/devices/{id}/config/links", post(config::save_links::<H>))
        .route(
            "/devices/{id}/config/schedule",
            post(config::save_schedule::<H>),
        )
        .route("/devices/{id}/config/close", post(config::close::<H>))
}

/// Serialize a template, logging and degrading to 500 on failure.
///
/// Render failures are caught here, at the top of the rendering path, and
/// logged — the client gets a plain error instead of a partial fragment.
pub(crate) fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "template render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
