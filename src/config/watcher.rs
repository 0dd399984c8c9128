//! Configuration file watcher for hot-reload support
//!
//! Editors often emit several modify events per save; the watcher reloads
//! on each, but forwards a config only when it differs from the last one
//! it forwarded.

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::AppConfig;

/// Settle time before re-reading a modified file
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(100);

pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<AppConfig>,
}

impl ConfigWatcher {
    /// Load `config_path` and start watching it
    pub async fn new(config_path: String) -> Result<(Self, Arc<AppConfig>)> {
        let (tx, rx) = mpsc::channel(10);

        let initial_config = AppConfig::load(&config_path)
            .await
            .context("Failed to load initial config")?;
        let last_sent = Arc::new(Mutex::new(initial_config.clone()));

        // notify callbacks run on their own OS thread
        let runtime_handle = tokio::runtime::Handle::current();
        let path = config_path.clone();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    error!("Config watch error: {}", e);
                    return;
                }
            };
            if !matches!(event.kind, EventKind::Modify(_)) {
                return;
            }
            debug!("Config file modified: {:?}", event.paths);

            let path = path.clone();
            let tx = tx.clone();
            let last_sent = last_sent.clone();
            runtime_handle.spawn(async move {
                tokio::time::sleep(RELOAD_DEBOUNCE).await;
                reload(&path, &last_sent, &tx).await;
            });
        })?;

        watcher
            .watch(Path::new(&config_path), RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch config file: {}", config_path))?;

        info!("Config file watcher started for: {}", config_path);

        Ok((
            Self {
                _watcher: watcher,
                rx,
            },
            Arc::new(initial_config),
        ))
    }

    /// Next changed config; `None` once the watcher is closed
    pub async fn next_config(&mut self) -> Option<AppConfig> {
        self.rx.recv().await
    }
}

async fn reload(path: &str, last_sent: &Mutex<AppConfig>, tx: &mpsc::Sender<AppConfig>) {
    let config = match AppConfig::load(path).await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to reload config (keeping old config): {:#}", e);
            return;
        }
    };

    {
        let Ok(mut last) = last_sent.lock() else {
            error!("Config watcher state poisoned");
            return;
        };
        if *last == config {
            debug!("Config reloaded without changes");
            return;
        }
        if last.model != config.model {
            info!(
                from = last.model.as_deref().unwrap_or("full"),
                to = config.model.as_deref().unwrap_or("full"),
                "Console model changed"
            );
        }
        *last = config.clone();
    }

    info!("Configuration reloaded successfully");
    if let Err(e) = tx.send(config).await {
        error!("Failed to send config update: {}", e);
    }
}
