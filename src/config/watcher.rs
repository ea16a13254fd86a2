//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RouterConfig;
use crate::observability::metrics;

/// A watcher that monitors the configuration file for changes.
///
/// The parent directory is watched so editors that replace the file on
/// save (write to temp, rename over) keep triggering reloads.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RouterConfig>,
    last: Mutex<Option<RouterConfig>>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
                last: Mutex::new(None),
            },
            update_rx,
        )
    }

    /// Seed the watcher with the configuration already in use, so an
    /// unchanged file is not re-sent.
    pub fn with_current(self, config: RouterConfig) -> Self {
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(config);
        self
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self.path.file_name().map(|name| name.to_os_string());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_config {
                        self.reload();
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?dir, "Config watcher started");
        Ok(watcher)
    }

    fn reload(&self) {
        match load_config(&self.path) {
            Ok(new_config) => {
                let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
                if last.as_ref() == Some(&new_config) {
                    tracing::debug!("Config unchanged, skipping reload");
                    return;
                }
                tracing::info!(rules = new_config.rules.len(), "Config file change detected, reloading");
                metrics::record_config_reload(true);
                *last = Some(new_config.clone());
                let _ = self.update_tx.send(new_config);
            }
            Err(e) => {
                metrics::record_config_reload(false);
                tracing::error!("Failed to reload config: {}. Keeping current configuration.", e);
            }
        }
    }
}
