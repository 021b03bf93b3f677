use chrono::Utc;
use jetson_exporter::core::config::ExporterConfig;
use jetson_exporter::core::system_monitor::{
    Collector, MountUsage, NetworkCounters, SystemCounters,
};
use jetson_exporter::core::telemetry::{StaticSource, TelemetrySnapshot};
use jetson_exporter::server::encode_text;
use serde_json::json;

struct IdleCounters;

impl SystemCounters for IdleCounters {
    fn disk_usage(&mut self) -> Vec<MountUsage> {
        vec![MountUsage {
            mount_point: "/".to_string(),
            total_bytes: 64_000_000_000,
            used_bytes: 16_000_000_000,
            available_bytes: 48_000_000_000,
            available_no_root_bytes: 45_000_000_000,
        }]
    }

    fn network_counters(&mut self) -> NetworkCounters {
        NetworkCounters::empty_at(Utc::now())
    }
}

fn scrape(snapshot: serde_json::Value) -> String {
    let mut collector = Collector::new(
        &ExporterConfig::default(),
        Box::new(StaticSource::new(TelemetrySnapshot::from_value(snapshot))),
        Box::new(IdleCounters),
    )
    .unwrap();

    encode_text(&collector.collect()).unwrap()
}

#[test]
fn test_scrape_exposes_unit_suffixed_names() {
    let text = scrape(json!({
        "memory": {"RAM": {"tot": 7_620_000, "used": 2_000_000}},
        "uptime": 100
    }));

    assert!(text.contains("# TYPE ram_kB gauge"));
    assert!(text.contains(r#"ram_kB{statistic="total"} 7620000"#));
    assert!(text.contains(r#"disk_GB{statistic="total"} 64"#));
    assert!(text.contains(r#"disk_GB{statistic="available_no_root"} 45"#));
    assert!(text.contains(r#"uptime_s{statistic="alive"} 100"#));
}

#[test]
fn test_scrape_power_rail_labels() {
    let text = scrape(json!({
        "power": {
            "rail": {
                "VDD_IN": {"online": true, "volt": 5080, "curr": 1040, "power": 5283, "avg": 5100, "warn": 32760},
                "VDD_SOC": {"online": false}
            },
            "tot": {"power": 5283, "avg": 5100}
        }
    }));

    assert!(text.contains(
        r#"power_voltage_millivolts{machine_part="VDD_IN",online="true",critical="false"} 5080"#
    ));
    assert!(text.contains(
        r#"power_voltage_millivolts{machine_part="VDD_SOC",online="false",critical="true"} 0"#
    ));
    assert!(text.contains(r#"power_total_milliwatts{statistic="power"} 5283"#));
    assert!(text.contains(r#"power_total_milliwatts{statistic="average"} 5100"#));
}

#[test]
fn test_scrape_keeps_empty_families_as_headers() {
    let text = scrape(json!({}));

    for name in [
        "fan_speed_percent",
        "fan_rpm",
        "fan_config_info",
        "nvpmodel_info",
        "network_bandwidth_bytes_per_second",
    ] {
        assert!(text.contains(&format!("# TYPE {} gauge\n", name)), "{} header missing", name);
        assert!(!text.contains(&format!("{}{{", name)), "{} should have no rows", name);
    }
    assert!(text.contains("# HELP fan_rpm Fan rotations per minute\n"));
    assert!(text.contains(r#"ram_kB{statistic="total"} 0"#));

    let fan_at = text.find("# TYPE fan_speed_percent gauge").unwrap();
    let disk_at = text.find("# TYPE disk_GB gauge").unwrap();
    assert!(fan_at < disk_at);
}
