// Application state module
// Shared, read-only request state plus the shutdown signals the server loop needs

use std::sync::Arc;
use tokio::sync::{watch, Notify};

use super::types::Config;
use crate::preset::PresetStore;

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub presets: PresetStore,

    /// Notified once to stop accepting and drain connections
    pub shutdown: Arc<Notify>,

    /// Flipped to `true` once accepting stops; open connections close when idle
    pub closing: watch::Sender<bool>,
}

impl AppState {
    pub fn new(config: &Config, presets: PresetStore) -> Self {
        let (closing, _) = watch::channel(false);
        Self {
            config: config.clone(),
            presets,
            shutdown: Arc::new(Notify::new()),
            closing,
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }

    /// Ask every open connection to finish its current request and close
    pub fn close_connections(&self) {
        self.closing.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_log_follows_config() {
        let cfg = Config::from_toml_str("[logging]\naccess_log = false").unwrap();
        let state = AppState::new(&cfg, PresetStore::bundled(&cfg.presets).unwrap());
        assert!(!state.access_log_enabled());
    }

    #[test]
    fn test_close_connections_reaches_late_subscribers() {
        let cfg = Config::from_toml_str("").unwrap();
        let state = AppState::new(&cfg, PresetStore::bundled(&cfg.presets).unwrap());
        assert!(!*state.closing.subscribe().borrow());

        state.close_connections();
        assert!(*state.closing.subscribe().borrow());
    }
}
