//! Shared application state for axum handlers.

use std::sync::Arc;

use thermopanel_app::ports::HostClient;
use thermopanel_app::services::config_service::ConfigService;
use thermopanel_app::services::panel_service::PanelService;
use thermopanel_app::services::status_service::StatusService;

/// Application state shared across all axum handlers.
///
/// Generic over the host client type to avoid dynamic dispatch. `Clone` is
/// implemented manually so the underlying types themselves do not need to
/// be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<H> {
    /// Status widget renderer.
    pub status_service: Arc<StatusService<H>>,
    /// Control panel renderer and command dispatcher.
    pub panel_service: Arc<PanelService<H>>,
    /// Configuration panel renderer and persister.
    pub config_service: Arc<ConfigService<H>>,
    /// Direct host access for the device index.
    pub host: Arc<H>,
}

impl<H> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            status_service: Arc::clone(&self.status_service),
            panel_service: Arc::clone(&self.panel_service),
            config_service: Arc::clone(&self.config_service),
            host: Arc::clone(&self.host),
        }
    }
}

impl<H: HostClient + 'static> AppState<H> {
    /// Create a new application state from service instances.
    pub fn new(
        status_service: StatusService<H>,
        panel_service: PanelService<H>,
        config_service: ConfigService<H>,
        host: Arc<H>,
    ) -> Self {
        Self {
            status_service: Arc::new(status_service),
            panel_service: Arc::new(panel_service),
            config_service: Arc::new(config_service),
            host,
        }
    }
}
