use chrono::{DateTime, Duration, TimeZone, Utc};
use jetson_exporter::core::config::ExporterConfig;
use jetson_exporter::core::system_monitor::{
    Collector, InterfaceCounters, MetricRecord, MountUsage, NetworkCounters, SystemCounters,
};
use jetson_exporter::core::telemetry::{JsonFileSource, StaticSource, TelemetrySnapshot};
use serde_json::json;
use std::collections::VecDeque;
use std::io::Write;
use tempfile::NamedTempFile;

/// Replays queued network samples; repeats the last one when exhausted.
struct ScriptedCounters {
    samples: VecDeque<NetworkCounters>,
    last: NetworkCounters,
    mounts: Vec<MountUsage>,
}

impl ScriptedCounters {
    fn new(samples: Vec<NetworkCounters>) -> Self {
        Self {
            last: NetworkCounters::empty_at(t0()),
            samples: samples.into(),
            mounts: Vec::new(),
        }
    }

    fn with_mounts(mut self, mounts: Vec<MountUsage>) -> Self {
        self.mounts = mounts;
        self
    }
}

impl SystemCounters for ScriptedCounters {
    fn disk_usage(&mut self) -> Vec<MountUsage> {
        self.mounts.clone()
    }

    fn network_counters(&mut self) -> NetworkCounters {
        if let Some(next) = self.samples.pop_front() {
            self.last = next;
        }
        self.last.clone()
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

fn sample(at: DateTime<Utc>, interfaces: &[(&str, u64, u64)]) -> NetworkCounters {
    NetworkCounters {
        sampled_at: at,
        interfaces: interfaces
            .iter()
            .map(|(name, rx, tx)| {
                (
                    name.to_string(),
                    InterfaceCounters {
                        rx_bytes: *rx,
                        tx_bytes: *tx,
                    },
                )
            })
            .collect(),
    }
}

fn collector_with(snapshot: TelemetrySnapshot, counters: ScriptedCounters) -> Collector {
    Collector::new(
        &ExporterConfig::default(),
        Box::new(StaticSource::new(snapshot)),
        Box::new(counters),
    )
    .unwrap()
}

fn family<'a>(records: &'a [MetricRecord], name: &str) -> &'a MetricRecord {
    records
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("family {} missing", name))
}

#[test]
fn test_two_cores_one_offline_with_total() {
    let snapshot = TelemetrySnapshot::from_value(json!({
        "cpu": {
            "total": {"user": 20.0, "nice": 0.0, "system": 5.0, "idle": 75.0},
            "cpu": [
                {"online": true, "freq": {"cur": 1_420_800, "min": 115_200, "max": 2_201_600},
                 "user": 30.0, "nice": 0.0, "system": 10.0, "idle": 60.0},
                {"online": false, "freq": {"cur": 0, "min": 0, "max": 0}}
            ]
        }
    }));

    let mut collector = collector_with(snapshot, ScriptedCounters::new(Vec::new()));
    let records = collector.collect();

    let frequency = family(&records, "cpu_Hz");
    assert_eq!(frequency.len(), 3);
    assert_eq!(frequency.value_for(&["0", "cur"]), Some(1_420_800.0));
    assert_eq!(frequency.value_for(&["0", "min"]), Some(115_200.0));
    assert_eq!(frequency.value_for(&["0", "max"]), Some(2_201_600.0));
    assert!(frequency.samples.iter().all(|s| s.labels[0].render() != "1"));

    let utilization = family(&records, "cpu_utilization_percent");
    let total_rows = utilization
        .samples
        .iter()
        .filter(|s| s.labels[0].render() == "total")
        .count();
    assert_eq!(total_rows, 4);
    assert_eq!(utilization.value_for(&["total", "idle"]), Some(75.0));
    assert!(utilization
        .samples
        .iter()
        .all(|s| s.labels[0].render() != "1"));
}

#[test]
fn test_empty_cpu_total_emits_no_total_rows() {
    let snapshot = TelemetrySnapshot::from_value(json!({
        "cpu": {
            "total": {},
            "cpu": [{"online": true, "freq": {"cur": 1, "min": 1, "max": 1}, "idle": 99.0}]
        }
    }));

    let mut collector = collector_with(snapshot, ScriptedCounters::new(Vec::new()));
    let records = collector.collect();
    let utilization = family(&records, "cpu_utilization_percent");

    assert_eq!(utilization.len(), 4);
    assert_eq!(utilization.value_for(&["total", "idle"]), None);
    assert_eq!(utilization.value_for(&["0", "idle"]), Some(99.0));
}

#[test]
fn test_absent_fan_domain_keeps_three_empty_families() {
    let mut collector =
        collector_with(TelemetrySnapshot::default(), ScriptedCounters::new(Vec::new()));
    let records = collector.collect();

    for name in ["fan_speed_percent", "fan_rpm", "fan_config_info"] {
        assert!(family(&records, name).is_empty(), "{} should have no rows", name);
    }
}

#[test]
fn test_every_row_matches_its_label_schema() {
    let snapshot = TelemetrySnapshot::from_value(json!({
        "temperature": {"cpu": {"online": true, "temp": 45.0}, "tj": {"online": false, "temp": -999}},
        "power": {
            "rail": {"VDD_IN": {"online": true, "volt": 5000, "curr": 1000, "power": 5000, "avg": 4900, "warn": 32760}},
            "tot": {"power": 5000, "avg": 4900}
        },
        "fan": {"pwmfan": {"speed": [40.0], "rpm": [1500], "profile": "quiet"}},
        "processes": [[1, "root", "GPU", "G", 0, "S", 1.0, 100, 50, "init"]],
        "stats": {"CPU1": 10, "NVENC": "OFF"},
        "nvpmodel": "MAXN",
        "uptime": 12.5,
        "jetson_clocks": true
    }));

    let mut collector = collector_with(snapshot, ScriptedCounters::new(Vec::new()));
    for record in collector.collect() {
        for row in &record.samples {
            assert_eq!(row.labels.len(), record.label_names.len(), "{}", record.name);
            assert!(row.value.is_finite(), "{}", record.name);
        }
    }
}

#[test]
fn test_temperature_criticality_end_to_end() {
    let snapshot = TelemetrySnapshot::from_value(json!({
        "temperature": {
            "cpu": {"online": true, "temp": 45.0},
            "cv0": {"online": false, "temp": -999}
        }
    }));

    let mut collector = collector_with(snapshot, ScriptedCounters::new(Vec::new()));
    let records = collector.collect();
    let temperature = family(&records, "temperature");

    assert_eq!(temperature.value_for(&["temp", "cpu", "false"]), Some(45.0));
    assert_eq!(temperature.value_for(&["temp", "cv0", "true"]), Some(-999.0));
}

#[test]
fn test_new_interface_reported_from_second_cycle() {
    let counters = ScriptedCounters::new(vec![
        sample(t0(), &[("eth0", 1_000, 500)]),
        sample(t0() + Duration::seconds(1), &[("eth0", 3_000, 1_500), ("wlan0", 100, 100)]),
        sample(t0() + Duration::seconds(2), &[("eth0", 3_000, 1_500), ("wlan0", 900, 300)]),
    ]);
    let mut collector = collector_with(TelemetrySnapshot::default(), counters);

    let first = collector.collect();
    let network = family(&first, "network_bandwidth_bytes_per_second");
    assert_eq!(network.value_for(&["eth0", "rx"]), Some(2_000.0));
    assert_eq!(network.value_for(&["eth0", "tx"]), Some(1_000.0));
    assert_eq!(network.value_for(&["wlan0", "rx"]), None);

    let second = collector.collect();
    let network = family(&second, "network_bandwidth_bytes_per_second");
    assert_eq!(network.value_for(&["wlan0", "rx"]), Some(800.0));
    assert_eq!(network.value_for(&["wlan0", "tx"]), Some(200.0));
    assert_eq!(network.value_for(&["eth0", "rx"]), Some(0.0));
}

#[test]
fn test_zero_interval_yields_zero_rates() {
    let counters = ScriptedCounters::new(vec![
        sample(t0(), &[("eth0", 1_000, 1_000)]),
        sample(t0(), &[("eth0", 9_000, 9_000)]),
    ]);
    let mut collector = collector_with(TelemetrySnapshot::default(), counters);

    let records = collector.collect();
    let network = family(&records, "network_bandwidth_bytes_per_second");
    assert_eq!(network.value_for(&["eth0", "rx"]), Some(0.0));
    assert_eq!(network.value_for(&["eth0", "tx"]), Some(0.0));
}

#[test]
fn test_disk_without_root_mount_is_zeroed() {
    let counters = ScriptedCounters::new(Vec::new()).with_mounts(vec![MountUsage {
        mount_point: "/data".to_string(),
        total_bytes: 5_000_000_000,
        used_bytes: 1_000_000_000,
        available_bytes: 4_000_000_000,
        available_no_root_bytes: 3_500_000_000,
    }]);
    let mut collector = collector_with(TelemetrySnapshot::default(), counters);

    let records = collector.collect();
    let disk = family(&records, "disk");
    assert_eq!(disk.len(), 4);
    assert!(disk.samples.iter().all(|s| s.value == 0.0));
}

#[test]
fn test_disk_root_mount_in_gigabytes() {
    let counters = ScriptedCounters::new(Vec::new()).with_mounts(vec![MountUsage {
        mount_point: "/".to_string(),
        total_bytes: 1_000_000_000,
        used_bytes: 0,
        available_bytes: 1_000_000_000,
        available_no_root_bytes: 1_000_000_000,
    }]);
    let mut collector = collector_with(TelemetrySnapshot::default(), counters);

    let records = collector.collect();
    assert_eq!(family(&records, "disk").value_for(&["total"]), Some(1.0));
}

#[test]
fn test_snapshot_file_drives_cycle() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        json!({
            "uptime": 3600,
            "nvpmodel": "15W",
            "processes": [
                [100, "root", "GPU", "G", 20, "S", 12.5, 2048, 1024, "nvargus-daemon"],
                [101, "root", "GPU"],
            ]
        })
    )
    .unwrap();

    let config = ExporterConfig::default();
    let mut collector = Collector::new(
        &config,
        Box::new(JsonFileSource::new(file.path(), config.update_period())),
        Box::new(ScriptedCounters::new(Vec::new())),
    )
    .unwrap();
    let records = collector.collect();

    assert_eq!(family(&records, "uptime").value_for(&["alive"]), Some(3600.0));
    assert_eq!(family(&records, "nvpmodel_info").value_for(&["15W"]), Some(1.0));

    let processes = family(&records, "process_memory_rss_kb");
    assert_eq!(processes.len(), 1);
    assert_eq!(
        processes.value_for(&["100", "root", "nvargus-daemon"]),
        Some(1024.0)
    );
}

#[test]
fn test_missing_snapshot_file_degrades_to_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = ExporterConfig::default();
    let mut collector = Collector::new(
        &config,
        Box::new(JsonFileSource::new(
            dir.path().join("snapshot.json"),
            config.update_period(),
        )),
        Box::new(ScriptedCounters::new(Vec::new())),
    )
    .unwrap();

    let records = collector.collect();
    assert_eq!(family(&records, "uptime").value_for(&["alive"]), Some(0.0));
    assert!(family(&records, "nvpmodel_info").is_empty());
    assert_eq!(family(&records, "jetson_clocks").len(), 1);
}
