use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::snapshot::TelemetrySnapshot;
use crate::error::{ExporterError, Result};

/// Snapshots older than this many sampling periods are reported as stale.
const STALE_AFTER_PERIODS: u32 = 10;

/// Trait for telemetry snapshot providers
///
/// Implementations hand out the most recent point-in-time bundle of hardware
/// readings. They are called once per collection cycle.
pub trait TelemetrySource: Send {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Read the current snapshot
    fn read_snapshot(&mut self) -> Result<TelemetrySnapshot>;

    /// Check if the source can currently produce snapshots
    fn is_available(&self) -> bool;
}

/// Reads the snapshot document the acquisition agent keeps rewriting on disk.
pub struct JsonFileSource {
    path: PathBuf,
    update_period: Duration,
}

impl JsonFileSource {
    pub fn new<P: Into<PathBuf>>(path: P, update_period: Duration) -> Self {
        Self {
            path: path.into(),
            update_period,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn warn_if_stale(&self) {
        let modified = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => return,
        };

        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        let limit = match self.update_period.checked_mul(STALE_AFTER_PERIODS) {
            Some(limit) => limit,
            None => return,
        };

        if age > limit {
            log::warn!(
                "Telemetry snapshot {:?} is {:.1}s old (sampling period {:.1}s)",
                self.path,
                age.as_secs_f64(),
                self.update_period.as_secs_f64()
            );
        }
    }
}

impl TelemetrySource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn read_snapshot(&mut self) -> Result<TelemetrySnapshot> {
        let data = fs::read_to_string(&self.path).map_err(|e| {
            ExporterError::telemetry(format!("cannot read snapshot {:?}: {}", self.path, e))
        })?;

        self.warn_if_stale();

        if data.trim().is_empty() {
            // The agent truncates before rewriting; treat as "no data yet"
            return Ok(TelemetrySnapshot::default());
        }

        TelemetrySnapshot::from_json_str(&data)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }
}

/// Serves a fixed snapshot every cycle.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: TelemetrySnapshot,
}

impl StaticSource {
    pub fn new(snapshot: TelemetrySnapshot) -> Self {
        Self { snapshot }
    }

    pub fn set_snapshot(&mut self, snapshot: TelemetrySnapshot) {
        self.snapshot = snapshot;
    }
}

impl TelemetrySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn read_snapshot(&mut self) -> Result<TelemetrySnapshot> {
        Ok(self.snapshot.clone())
    }

    fn is_available(&self) -> bool {
        true
    }
}
