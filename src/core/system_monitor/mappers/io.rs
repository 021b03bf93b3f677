//! Families fed by OS counters rather than the telemetry snapshot.

use std::collections::BTreeMap;

use crate::core::system_monitor::disk::DiskUsageReading;
use crate::core::system_monitor::metrics::MetricRecord;
use crate::core::system_monitor::rate::InterfaceRate;
use crate::labels;

pub fn disk_metrics(reading: &DiskUsageReading, unit: &str) -> Vec<MetricRecord> {
    let mut record = MetricRecord::new(
        "disk",
        &format!("Root filesystem usage (unit: {})", unit),
        &["statistic"],
    )
    .with_unit(unit);

    record.add_sample(labels!["total"], reading.total);
    record.add_sample(labels!["used"], reading.used);
    record.add_sample(labels!["available"], reading.available);
    record.add_sample(labels!["available_no_root"], reading.available_no_root);

    vec![record]
}

pub fn network_metrics(rates: &BTreeMap<String, InterfaceRate>) -> Vec<MetricRecord> {
    let mut record = MetricRecord::new(
        "network_bandwidth_bytes_per_second",
        "Network bandwidth usage per interface (bytes/sec)",
        &["interface", "direction"],
    );

    for (interface, rate) in rates {
        record.add_sample(labels![interface, "rx"], rate.rx_bytes_per_sec);
        record.add_sample(labels![interface, "tx"], rate.tx_bytes_per_sec);
    }

    vec![record]
}
