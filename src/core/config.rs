use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ExporterError, Result};

/// The acquisition agent cannot sample reliably faster than this.
pub const MIN_UPDATE_PERIOD_SECS: f64 = 0.5;

/// Longest supported sampling period (one day).
pub const MAX_UPDATE_PERIOD_SECS: f64 = 86_400.0;

pub const DEFAULT_UPDATE_PERIOD_SECS: f64 = 1.0;
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:9100";
pub const DEFAULT_SNAPSHOT_PATH: &str = "/run/jtop/snapshot.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Sampling interval of the telemetry agent, in seconds
    pub update_period_secs: f64,
    pub listen_address: SocketAddr,
    /// Snapshot file written by the acquisition agent
    pub snapshot_path: PathBuf,
    pub log_level: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            update_period_secs: DEFAULT_UPDATE_PERIOD_SECS,
            listen_address: SocketAddr::from(([0, 0, 0, 0], 9100)),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            log_level: "info".to_string(),
        }
    }
}

impl ExporterConfig {
    /// Load configuration from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;

        // An empty file is treated as "all defaults"
        if data.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(ExporterConfig::default());
        }

        let config: ExporterConfig = serde_json::from_slice(&data)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;

        Ok(())
    }

    /// Reject configurations the exporter cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.update_period_secs.is_finite() || self.update_period_secs < MIN_UPDATE_PERIOD_SECS
        {
            return Err(ExporterError::invalid_configuration(format!(
                "update period {}s is below the {}s minimum supported by the telemetry agent",
                self.update_period_secs, MIN_UPDATE_PERIOD_SECS
            )));
        }

        if self.update_period_secs > MAX_UPDATE_PERIOD_SECS {
            return Err(ExporterError::invalid_configuration(format!(
                "update period {}s exceeds the {}s maximum",
                self.update_period_secs, MAX_UPDATE_PERIOD_SECS
            )));
        }

        self.level_filter()?;
        Ok(())
    }

    /// Sampling period, clamped to the supported range.
    pub fn update_period(&self) -> Duration {
        let secs = self
            .update_period_secs
            .clamp(MIN_UPDATE_PERIOD_SECS, MAX_UPDATE_PERIOD_SECS);
        Duration::try_from_secs_f64(secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_UPDATE_PERIOD_SECS))
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level).map_err(|_| {
            ExporterError::invalid_configuration(format!("unknown log level '{}'", self.log_level))
        })
    }

    pub fn set_update_period_secs(&mut self, secs: f64) {
        self.update_period_secs = secs;
    }

    pub fn set_listen_address(&mut self, address: &str) -> Result<()> {
        self.listen_address = address.parse().map_err(|_| {
            ExporterError::invalid_configuration(format!("invalid listen address '{}'", address))
        })?;
        Ok(())
    }

    pub fn set_snapshot_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.snapshot_path = path.into();
    }

    pub fn set_log_level<S: Into<String>>(&mut self, level: S) {
        self.log_level = level.into();
    }
}
