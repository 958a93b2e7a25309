//! Application state for the billing API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the configuration loaded at startup. Each billing request takes its
/// own parameter snapshot from it.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_state_shares_the_loaded_config() {
        let state = AppState::new(ConfigLoader::load("./config/comedor").unwrap());
        let cloned = state.clone();
        assert_eq!(
            state.config().holidays().len(),
            cloned.config().holidays().len()
        );
    }
}
