//! System monitoring core functionality.
//!
//! This module turns telemetry snapshots and OS counters into metric
//! records: per-domain mappers, network rate tracking, disk usage
//! normalization and the collection cycle that ties them together.

mod collector;
pub mod counters;
pub mod criticality;
pub mod disk;
pub mod mappers;
mod metrics;
pub mod rate;

pub use collector::Collector;
pub use counters::{
    InterfaceCounters, MountUsage, NetworkCounters, SysinfoCounters, SystemCounters,
};
pub use disk::{DiskUsageNormalizer, DiskUsageReading, DisplayUnit, GIGABYTE};
pub use metrics::{LabelValue, MetricRecord, Sample};
pub use rate::{InterfaceRate, RateTracker};
