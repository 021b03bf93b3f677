//! Telemetry snapshot model and the sources that provide it.
//!
//! The exporter never talks to the hardware itself; an on-device agent
//! publishes one snapshot per sampling period and a [`TelemetrySource`]
//! hands the latest one to the collector.

pub mod defaults;
mod snapshot;
mod source;

pub use snapshot::{
    CpuCore, CpuDomain, CpuTimes, EmcStats, FanReading, FrequencyRange, GpuDevice, GpuDomain,
    GpuFrequency, GpuStatus, MemoryDomain, PowerDomain, PowerRail, PowerTotal, RamStats,
    SwapStats, TelemetrySnapshot, TemperatureSensor,
};
pub use source::{JsonFileSource, StaticSource, TelemetrySource};
