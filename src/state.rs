//! Shared application state for request handlers.

use std::sync::Arc;

use crate::clock::ProcessClock;
use crate::config::AppConfig;

/// Shared application state, cloneable across handlers.
///
/// Both fields are read-only after startup, so handlers need no locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub clock: ProcessClock,
}

impl AppState {
    /// Creates a new application state from the configuration and start clock.
    pub fn new(config: AppConfig, clock: ProcessClock) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }
}
