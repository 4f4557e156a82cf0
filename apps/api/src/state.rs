use std::sync::Arc;

use crate::config::Config;
use crate::generation_client::Generator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend. `None` while no credential is configured; the
    /// analyze handler then reports a configuration error without touching
    /// the network.
    pub generator: Option<Arc<dyn Generator>>,
    pub config: Config,
}
