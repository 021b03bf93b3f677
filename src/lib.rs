// Jetson Exporter Library - Public API

// Re-export error types
pub mod error;
pub use error::{ExporterError, Result};

// Module declarations
pub mod core;
pub mod server;

// Re-export commonly used types
pub use crate::core::config::ExporterConfig;
pub use crate::core::system_monitor::{Collector, MetricRecord};

/// Initialize logging at `level`; `RUST_LOG` overrides it when set.
pub fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
