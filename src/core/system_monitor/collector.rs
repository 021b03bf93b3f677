use std::time::{Duration, Instant};

use crate::core::config::ExporterConfig;
use crate::core::telemetry::{JsonFileSource, TelemetrySnapshot, TelemetrySource};
use crate::error::Result;

use super::counters::{SysinfoCounters, SystemCounters};
use super::disk::DiskUsageNormalizer;
use super::mappers::*;
use super::metrics::MetricRecord;
use super::rate::RateTracker;

/// Runs one collection cycle per call to [`Collector::collect`].
///
/// Holds the only cross-cycle state (the previous network sample). Callers
/// must serialize cycles; `collect` takes `&mut self` for that reason.
pub struct Collector {
    telemetry: Box<dyn TelemetrySource>,
    counters: Box<dyn SystemCounters>,
    rates: RateTracker,
    disk: DiskUsageNormalizer,
    update_period: Duration,
    cycles: u64,
}

impl Collector {
    /// Validates `config` and seeds the rate tracker with a first sample.
    pub fn new(
        config: &ExporterConfig,
        telemetry: Box<dyn TelemetrySource>,
        mut counters: Box<dyn SystemCounters>,
    ) -> Result<Self> {
        config.validate()?;

        let initial = counters.network_counters();
        log::info!(
            "Collector ready: source={}, interfaces={}, update period {:.1}s",
            telemetry.name(),
            initial.interfaces.len(),
            config.update_period_secs
        );

        Ok(Self {
            telemetry,
            counters,
            rates: RateTracker::new(initial),
            disk: DiskUsageNormalizer::new(),
            update_period: config.update_period(),
            cycles: 0,
        })
    }

    /// Snapshot file source and sysinfo counters, as used in production.
    pub fn from_config(config: &ExporterConfig) -> Result<Self> {
        let source = JsonFileSource::new(&config.snapshot_path, config.update_period());
        if !source.is_available() {
            log::warn!(
                "Telemetry snapshot {:?} not found yet; telemetry families will be empty",
                source.path()
            );
        }

        Self::new(config, Box::new(source), Box::new(SysinfoCounters::new()))
    }

    pub fn update_period(&self) -> Duration {
        self.update_period
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    fn read_snapshot(&mut self) -> TelemetrySnapshot {
        match self.telemetry.read_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!(
                    "Failed to read telemetry from {}: {}",
                    self.telemetry.name(),
                    e
                );
                TelemetrySnapshot::default()
            }
        }
    }

    /// Collect the complete metric set.
    ///
    /// Family order: cpu, gpu, ram, swap, emc, temperature, power rails,
    /// power totals, fan, nvpmodel, disk, uptime, stats, processes,
    /// jetson_clocks, network.
    pub fn collect(&mut self) -> Vec<MetricRecord> {
        let started = Instant::now();

        let snapshot = self.read_snapshot();
        let mounts = self.counters.disk_usage();
        let (disk, unit) = self.disk.normalize(&mounts);
        let network = self.rates.compute(self.counters.network_counters());

        let mut records = Vec::new();
        records.extend(cpu_metrics(&snapshot.cpu));
        records.extend(gpu_metrics(&snapshot.gpu));
        records.extend(memory_metrics(&snapshot.memory));
        records.extend(temperature_metrics(&snapshot.temperature));
        records.extend(power_rail_metrics(&snapshot.power));
        records.extend(power_total_metrics(&snapshot.power));
        records.extend(fan_metrics(snapshot.fan.as_ref()));
        records.extend(nvpmodel_metrics(snapshot.nvpmodel.as_deref()));
        records.extend(disk_metrics(&disk, unit));
        records.extend(uptime_metrics(snapshot.uptime_secs));
        records.extend(stats_metrics(&snapshot.stats));
        records.extend(process_metrics(&snapshot.processes));
        records.extend(jetson_clocks_metrics(snapshot.jetson_clocks));
        records.extend(network_metrics(&network));

        self.cycles += 1;
        log::debug!(
            "Cycle {}: {} families, {} rows in {:?}",
            self.cycles,
            records.len(),
            records.iter().map(MetricRecord::len).sum::<usize>(),
            started.elapsed()
        );

        records
    }
}
