//! Configuration panel fragment and its form handlers.

use std::collections::HashMap;

use askama::Template;
use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use thermopanel_app::ports::HostClient;
use thermopanel_app::services::config_service::{ConfigView, LinkKind};
use thermopanel_domain::error::{PanelError, ValidationError};
use thermopanel_domain::id::DeviceId;
use thermopanel_domain::schedule::{Schedule, TimeOfDay};
use thermopanel_domain::sensors::SensorList;

use super::render;
use crate::error::ApiError;
use crate::state::AppState;

/// Configuration panel template.
#[derive(Template)]
#[template(path = "config.html")]
pub struct ConfigTemplate {
    view: ConfigView,
}

impl IntoResponse for ConfigTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

/// `GET /devices/{id}/config` — configuration panel fragment.
pub async fn show<H: HostClient + 'static>(
    State(state): State<AppState<H>>,
    Path(id): Path<u32>,
) -> Result<ConfigTemplate, ApiError> {
    let view = state.config_service.view(DeviceId::new(id)).await?;
    Ok(ConfigTemplate { view })
}

/// `POST /devices/{id}/config/sensors` — persist the sensor rows (PRG).
///
/// The form posts one `sensorN` field per row; rows are read in numeric
/// order and empty rows are skipped, so the persisted list is exactly the
/// visible selection order.
pub async fn save_sensors<H: HostClient + 'static>(
    State(state): State<AppState<H>>,
    Path(id): Path<u32>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, ApiError> {
    let mut rows: Vec<(u32, &String)> = form
        .iter()
        .filter_map(|(field, value)| {
            field
                .strip_prefix("sensor")
                .and_then(|suffix| suffix.parse().ok())
                .map(|row: u32| (row, value))
        })
        .collect();
    rows.sort_by_key(|(row, _)| *row);

    let mut ids = Vec::new();
    for (_, value) in rows {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let id: DeviceId = value.parse().map_err(|_| {
            ApiError::from(PanelError::from(ValidationError::MalformedDeviceId(
                value.to_string(),
            )))
        })?;
        ids.push(id);
    }

    state
        .config_service
        .save_sensors(DeviceId::new(id), &SensorList::new(ids))
        .await?;

    Ok(Redirect::to(&format!("/devices/{id}/config")))
}

/// Form posted by the linked-devices section; empty string clears a link.
#[derive(Deserialize)]
pub struct LinksForm {
    #[serde(default)]
    pub heating: String,
    #[serde(default)]
    pub cooling: String,
    #[serde(default)]
    pub fan: String,
}

/// `POST /devices/{id}/config/links` — persist linked devices (PRG).
pub async fn save_links<H: HostClient + 'static>(
    State(state): State<AppState<H>>,
    Path(id): Path<u32>,
    Form(form): Form<LinksForm>,
) -> Result<Redirect, ApiError> {
    let device = DeviceId::new(id);
    for (kind, value) in [
        (LinkKind::Heating, &form.heating),
        (LinkKind::Cooling, &form.cooling),
        (LinkKind::Fan, &form.fan),
    ] {
        let target = parse_optional_id(value)?;
        state.config_service.save_link(device, kind, target).await?;
    }

    Ok(Redirect::to(&format!("/devices/{id}/config")))
}

/// Form posted by the schedule section; all fields optional text.
#[derive(Deserialize)]
pub struct ScheduleForm {
    #[serde(default)]
    pub start_hour: String,
    #[serde(default)]
    pub start_minute: String,
    #[serde(default)]
    pub end_hour: String,
    #[serde(default)]
    pub end_minute: String,
}

/// `POST /devices/{id}/config/schedule` — persist the schedule (PRG).
///
/// An empty start hour clears the whole schedule; empty minute or end
/// fields default to zero, matching the way the schedule has always been
/// encoded.
pub async fn save_schedule<H: HostClient + 'static>(
    State(state): State<AppState<H>>,
    Path(id): Path<u32>,
    Form(form): Form<ScheduleForm>,
) -> Result<Redirect, ApiError> {
    let schedule = if form.start_hour.trim().is_empty() {
        None
    } else {
        let start = TimeOfDay::new(
            parse_component(&form.start_hour)?,
            parse_component_or_zero(&form.start_minute)?,
        )
        .map_err(PanelError::from)?;
        let end = TimeOfDay::new(
            parse_component_or_zero(&form.end_hour)?,
            parse_component_or_zero(&form.end_minute)?,
        )
        .map_err(PanelError::from)?;
        Some(Schedule { start, end })
    };

    state
        .config_service
        .save_schedule(DeviceId::new(id), schedule)
        .await?;

    Ok(Redirect::to(&format!("/devices/{id}/config")))
}

/// `POST /devices/{id}/config/close` — before-close hook: re-push the mode
/// target so the host re-evaluates device logic, then return to the index.
pub async fn close<H: HostClient + 'static>(
    State(state): State<AppState<H>>,
    Path(id): Path<u32>,
) -> Result<Redirect, ApiError> {
    state.config_service.close(DeviceId::new(id)).await?;
    Ok(Redirect::to("/"))
}

fn parse_optional_id(value: &str) -> Result<Option<DeviceId>, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| {
        ApiError::from(PanelError::from(ValidationError::MalformedDeviceId(
            value.to_string(),
        )))
    })
}

fn parse_component(value: &str) -> Result<u16, ApiError> {
    value.trim().parse().map_err(|_| {
        ApiError::from(PanelError::from(ValidationError::MalformedSchedule(
            value.to_string(),
        )))
    })
}

fn parse_component_or_zero(value: &str) -> Result<u16, ApiError> {
    if value.trim().is_empty() {
        return Ok(0);
    }
    parse_component(value)
}
