// Core exporter logic

pub mod config;
pub mod system_monitor;
pub mod telemetry;

// Re-export commonly used items
pub use config::ExporterConfig;
pub use system_monitor::{Collector, MetricRecord};
pub use telemetry::{JsonFileSource, TelemetrySnapshot, TelemetrySource};
