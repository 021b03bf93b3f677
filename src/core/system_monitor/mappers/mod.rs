//! Per-domain mappers from telemetry and derived readings to metric records.
//!
//! Every mapper returns the same families regardless of input; only the
//! number of rows in each family varies.

mod cpu;
mod fan;
mod gpu;
mod info;
mod io;
mod memory;
mod power;
mod processes;
mod stats;
mod temperature;

pub use cpu::{cpu_metrics, TOTAL_CORE_LABEL};
pub use fan::fan_metrics;
pub use gpu::{gpu_metrics, GPU_NAME};
pub use info::{jetson_clocks_metrics, nvpmodel_metrics, uptime_metrics};
pub use io::{disk_metrics, network_metrics};
pub use memory::memory_metrics;
pub use power::{power_rail_metrics, power_total_metrics};
pub use processes::{process_metrics, ProcessRow, PROCESS_ROW_LEN};
pub use stats::{stats_metrics, ENGINE_NAMES, RESOURCE_NAMES};
pub use temperature::temperature_metrics;
