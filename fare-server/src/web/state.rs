//! Application state for the web layer.

use std::sync::Arc;

use crate::fare::TariffConfig;
use crate::reference::MemoryReference;

/// Shared application state.
///
/// Reference data is read-only, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Stations, lines and fare tables
    pub reference: Arc<MemoryReference>,

    /// Main-line formula constants
    pub config: Arc<TariffConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(reference: MemoryReference, config: TariffConfig) -> Self {
        Self {
            reference: Arc::new(reference),
            config: Arc::new(config),
        }
    }
}
