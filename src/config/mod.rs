//! Configuration management for console-mirror
//!
//! Handles loading, parsing, and hot-reloading of YAML configuration files.

pub mod watcher;

use crate::model::{self, ModelError, ModelSpec};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

pub use watcher::ConfigWatcher;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Console variant id (`full`, `compact`, `rack`); defaults to `full`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotConfig>,
}

/// Console network endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeviceConfig {
    #[serde(default = "default_device_host")]
    pub host: String,
    #[serde(default = "default_device_port")]
    pub port: u16,
    /// Local UDP port to bind (0 = ephemeral)
    #[serde(default)]
    pub local_port: u16,
}

/// State snapshot persistence
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: default_device_host(),
            port: default_device_port(),
            local_port: 0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: None,
            device: DeviceConfig::default(),
            snapshot: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::from_yaml(&contents).with_context(|| format!("Failed to parse YAML config: {}", path))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(contents)?;
        config.model_spec()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .await
            .with_context(|| format!("Failed to write config file: {}", path))?;

        Ok(())
    }

    /// Specification of the configured console model
    pub fn model_spec(&self) -> Result<&'static ModelSpec, ModelError> {
        model::lookup(self.model.as_deref())
    }

    /// `host:port` of the console
    pub fn device_addr(&self) -> String {
        format!("{}:{}", self.device.host, self.device.port)
    }

    /// Snapshot file path, if persistence is enabled
    pub fn snapshot_path(&self) -> Option<&str> {
        self.snapshot
            .as_ref()
            .filter(|s| s.enabled)
            .map(|s| s.path.as_str())
    }

    /// Sections of `other` that differ from `self` and only apply after a restart
    ///
    /// The model is hot-swappable and never listed.
    pub fn restart_required(&self, other: &AppConfig) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.device != other.device {
            changed.push("device");
        }
        if self.snapshot != other.snapshot {
            changed.push("snapshot");
        }
        changed
    }
}

// Default value functions
fn default_device_host() -> String {
    "192.168.1.70".to_string()
}
fn default_device_port() -> u16 {
    2223
}
fn default_true() -> bool {
    true
}
fn default_snapshot_path() -> String {
    "console-state.json".to_string()
}
