//! Application services — one per UI surface.

pub mod config_service;
pub mod panel_service;
pub mod status_service;
