//! Control panel fragment and its interaction handlers.

use askama::Template;
use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use thermopanel_app::ports::HostClient;
use thermopanel_app::services::panel_service::PanelView;
use thermopanel_domain::error::{PanelError, ValidationError};
use thermopanel_domain::id::DeviceId;
use thermopanel_domain::vocab::{SetpointKind, setpoint};

use super::render;
use crate::error::ApiError;
use crate::state::AppState;

/// Control panel template.
#[derive(Template)]
#[template(path = "panel.html")]
pub struct PanelTemplate {
    view: PanelView,
}

impl IntoResponse for PanelTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /devices/{id}/panel` — control panel fragment.
pub async fn show<H: HostClient + 'static>(
    State(state): State<AppState<H>>,
    Path(id): Path<u32>,
) -> Result<PanelTemplate, ApiError> {
    let view = state.panel_service.view(DeviceId::new(id)).await?;
    Ok(PanelTemplate { view })
}

/// Form posted by a selector change.
///
/// Field names mirror the `data-*` attributes on the rendered element.
#[derive(Deserialize)]
pub struct SelectForm {
    pub service: String,
    pub action: String,
    pub name: String,
    pub value: String,
}

/// `POST /devices/{id}/panel/select` — immediate selector dispatch (PRG).
pub async fn select<H: HostClient + 'static>(
    State(state): State<AppState<H>>,
    Path(id): Path<u32>,
    Form(form): Form<SelectForm>,
) -> Result<Redirect, ApiError> {
    state
        .panel_service
        .select(
            DeviceId::new(id),
            &form.service,
            &form.action,
            &form.name,
            &form.value,
        )
        .await?;

    Ok(Redirect::to(&format!("/devices/{id}/panel")))
}

/// Form posted by a setpoint button.
///
/// `value` is the currently displayed setpoint the client echoes back;
/// `incr` is the signed step from the button's `data-incr` attribute.
#[derive(Deserialize)]
pub struct SetpointForm {
    pub setpoint: SetpointKind,
    pub service: String,
    pub action: String,
    pub name: String,
    pub value: String,
    pub incr: String,
}

/// `POST /devices/{id}/panel/setpoint` — debounced adjustment (PRG).
///
/// The redirect re-renders the panel, which shows the optimistic value
/// while the deferred dispatch is pending.
pub async fn adjust<H: HostClient + 'static>(
    State(state): State<AppState<H>>,
    Path(id): Path<u32>,
    Form(form): Form<SetpointForm>,
) -> Result<Redirect, ApiError> {
    // The posted wiring must round-trip the rendered attributes verbatim.
    if form.service != form.setpoint.service()
        || form.action != setpoint::SET_CURRENT_SETPOINT
        || form.name != setpoint::NEW_CURRENT_SETPOINT
    {
        return Err(ApiError::from(PanelError::from(
            ValidationError::UnknownCommand {
                service: form.service,
                action: form.action,
                value: form.value,
            },
        )));
    }

    state
        .panel_service
        .adjust_setpoint(DeviceId::new(id), form.setpoint, &form.value, &form.incr)?;

    Ok(Redirect::to(&format!("/devices/{id}/panel")))
}
