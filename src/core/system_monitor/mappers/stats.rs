//! The flat summary block, whose keys name their own domain.
//!
//! `CPU1` -> per-core utilization, `Fan <name>` -> PWM, `Temp <name>` ->
//! temperature, `Power <name>` -> rail power, `RAM`/`SWAP`/`EMC`/`GPU` ->
//! usage, and hardware engine names -> on/off indicator. Anything else is
//! ignored.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::system_monitor::metrics::MetricRecord;
use crate::core::telemetry::defaults;
use crate::labels;

pub const ENGINE_NAMES: &[&str] = &[
    "APE",
    "DLA0_CORE",
    "DLA1_CORE",
    "NVDEC",
    "NVDEC1",
    "NVENC",
    "NVENC1",
    "NVJPG",
    "NVJPG1",
    "OFA",
    "PVA0_CPU_AXI",
    "SE",
    "VIC",
];

pub const RESOURCE_NAMES: &[&str] = &["RAM", "SWAP", "EMC", "GPU"];

const ENGINE_OFF: &str = "OFF";

#[derive(Debug, PartialEq, Eq)]
enum StatKey<'a> {
    Core(&'a str),
    Fan(&'a str),
    Temperature(&'a str),
    Power(&'a str),
    Resource(&'a str),
    Engine(&'a str),
    Ignored,
}

fn classify(key: &str) -> StatKey<'_> {
    if let Some(core) = key.strip_prefix("CPU") {
        if !core.is_empty() && core.chars().all(|c| c.is_ascii_digit()) {
            return StatKey::Core(core);
        }
    }
    if let Some(fan) = key.strip_prefix("Fan ") {
        return StatKey::Fan(fan);
    }
    if let Some(sensor) = key.strip_prefix("Temp ") {
        return StatKey::Temperature(sensor);
    }
    if let Some(rail) = key.strip_prefix("Power ") {
        return StatKey::Power(rail);
    }
    if RESOURCE_NAMES.contains(&key) {
        return StatKey::Resource(key);
    }
    if ENGINE_NAMES.contains(&key) {
        return StatKey::Engine(key);
    }
    StatKey::Ignored
}

fn engine_active(value: &Value) -> f64 {
    match value {
        Value::String(s) if s.eq_ignore_ascii_case(ENGINE_OFF) => 0.0,
        Value::Null => 0.0,
        _ => 1.0,
    }
}

pub fn stats_metrics(stats: &BTreeMap<String, Value>) -> Vec<MetricRecord> {
    let mut cores = MetricRecord::new(
        "stats_cpu_utilization_percent",
        "Per-core utilization from the summary block",
        &["core"],
    );
    let mut fans = MetricRecord::new(
        "stats_fan_pwm_percent",
        "Fan PWM duty from the summary block",
        &["fan"],
    );
    let mut temperatures = MetricRecord::new(
        "stats_temperature_celsius",
        "Sensor temperature from the summary block",
        &["sensor"],
    );
    let mut power = MetricRecord::new(
        "stats_power_milliwatts",
        "Rail power from the summary block",
        &["rail"],
    );
    let mut resources = MetricRecord::new(
        "stats_resource_usage_percent",
        "RAM, SWAP, EMC and GPU usage from the summary block",
        &["resource"],
    );
    let mut engines = MetricRecord::new(
        "stats_engine_active",
        "Hardware engine state from the summary block (1 = running)",
        &["engine"],
    );

    for (key, value) in stats {
        let number = || defaults::number_or_default(value);

        match classify(key) {
            StatKey::Core(core) => cores.add_sample(labels![core], number()),
            StatKey::Fan(fan) => fans.add_sample(labels![fan], number()),
            StatKey::Temperature(sensor) => temperatures.add_sample(labels![sensor], number()),
            StatKey::Power(rail) => power.add_sample(labels![rail], number()),
            StatKey::Resource(resource) => resources.add_sample(labels![resource], number()),
            StatKey::Engine(engine) => engines.add_sample(labels![engine], engine_active(value)),
            StatKey::Ignored => log::trace!("Ignoring summary key '{}'", key),
        }
    }

    vec![cores, fans, temperatures, power, resources, engines]
}
