//! Application state for the wage statement API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::export::RendererRegistry;

/// Shared application state.
///
/// Holds the loaded configuration and the statement renderers. Both are
/// read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    /// The loaded rules and holiday calendar.
    config: Arc<ConfigLoader>,
    /// Renderers keyed by export format.
    renderers: Arc<RendererRegistry>,
}

impl AppState {
    /// Creates a new application state with the built-in renderers.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_renderers(config, RendererRegistry::default())
    }

    /// Creates a new application state with a custom renderer registry.
    pub fn with_renderers(config: ConfigLoader, renderers: RendererRegistry) -> Self {
        Self {
            config: Arc::new(config),
            renderers: Arc::new(renderers),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the renderer registry.
    pub fn renderers(&self) -> &RendererRegistry {
        &self.renderers
    }
}
