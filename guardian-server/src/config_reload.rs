//! Hot-reloadable configuration
//!
//! The handler reads the credential from here on every request, so a SIGHUP
//! reload (or an operator emptying the key) takes effect without a restart.

use std::{path::PathBuf, sync::Arc};

use arc_swap::ArcSwap;
use guardian_core::Config;
use tracing::{error, info, warn};

/// Current `Config` behind an atomic pointer, plus where to reload it from.
#[derive(Debug, Clone)]
pub struct ReloadableConfig {
    inner: Arc<ArcSwap<Config>>,
    /// `None` means the platform default location.
    source: Option<PathBuf>,
}

impl ReloadableConfig {
    #[must_use]
    pub fn new(config: Config, source: Option<PathBuf>) -> Self {
        Self { inner: Arc::new(ArcSwap::from_pointee(config)), source }
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn load(&self) -> Arc<Config> {
        self.inner.load_full()
    }

    pub fn replace(&self, config: Config) {
        if config.weather_api.api_key().is_none() {
            warn!("Configuration swapped in without a weather API key; requests will fail until it is restored");
        }
        self.inner.store(Arc::new(config));
    }

    /// Re-read file and environment. Returns `true` if the new config was applied.
    pub fn reload(&self) -> bool {
        match Config::load(self.source.as_deref()) {
            Ok(new_config) => {
                self.replace(new_config);
                info!("Configuration reloaded");
                true
            }
            Err(e) => {
                error!("Failed to reload configuration: {e}");
                false
            }
        }
    }
}

/// Reload on SIGHUP for as long as the process runs.
#[cfg(unix)]
pub fn spawn_config_reload_handler(config: ReloadableConfig) -> ReloadableConfig {
    use tokio::signal::unix::{SignalKind, signal};

    let handle = config.clone();
    tokio::spawn(async move {
        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to install SIGHUP handler: {e}");
                return;
            }
        };

        while sighup.recv().await.is_some() {
            info!("Received SIGHUP, reloading configuration");
            if !handle.reload() {
                warn!("Keeping previous configuration");
            }
        }
    });

    config
}

#[cfg(not(unix))]
pub fn spawn_config_reload_handler(config: ReloadableConfig) -> ReloadableConfig {
    warn!("SIGHUP config reload not supported on this platform");
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_returns_current_snapshot() {
        let reloadable = ReloadableConfig::new(Config::default().with_api_key("A"), None);
        assert_eq!(reloadable.load().weather_api.api_key(), Some("A"));

        reloadable.replace(Config::default().with_api_key("B"));
        assert_eq!(reloadable.load().weather_api.api_key(), Some("B"));
    }

    #[test]
    fn clones_share_the_same_config() {
        let reloadable = ReloadableConfig::new(Config::default().with_api_key("A"), None);
        let clone = reloadable.clone();

        reloadable.replace(Config::default());
        assert!(clone.load().weather_api.api_key().is_none());
    }

    #[test]
    fn reload_keeps_previous_config_on_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "this is = = not toml").unwrap();

        let reloadable =
            ReloadableConfig::new(Config::default().with_api_key("KEEP"), Some(file.path().to_path_buf()));

        assert!(!reloadable.reload());
        assert_eq!(reloadable.load().weather_api.api_key(), Some("KEEP"));
    }

    #[test]
    fn reload_picks_up_file_changes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9191").unwrap();

        let reloadable = ReloadableConfig::new(Config::default(), Some(file.path().to_path_buf()));

        assert!(reloadable.reload());
        assert_eq!(reloadable.load().server.port, 9191);
    }
}
