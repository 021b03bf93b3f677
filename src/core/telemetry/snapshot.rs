//! Telemetry snapshot produced by the on-device acquisition agent.
//!
//! One snapshot is read per collection cycle and never mutated afterwards.
//! Each domain decodes on its own: a domain that is missing or malformed
//! falls back to its default without affecting the others.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::defaults;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub cpu: CpuDomain,
    pub gpu: GpuDomain,
    pub memory: MemoryDomain,
    pub power: PowerDomain,
    pub temperature: BTreeMap<String, TemperatureSensor>,
    pub fan: Option<BTreeMap<String, FanReading>>,
    /// Raw positional rows; validated by the process mapper
    pub processes: Vec<Value>,
    /// Flat summary block, keys encode their own domain
    pub stats: BTreeMap<String, Value>,
    pub uptime_secs: Option<f64>,
    pub nvpmodel: Option<String>,
    pub jetson_clocks: bool,
}

// ============================================================================
// CPU
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuDomain {
    /// Aggregate over all cores, absent (or `{}`) on some agent versions
    #[serde(deserialize_with = "defaults::non_empty_object")]
    pub total: Option<CpuTimes>,
    #[serde(rename = "cpu")]
    pub cores: Vec<CpuCore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuCore {
    #[serde(deserialize_with = "defaults::lenient_flag")]
    pub online: bool,
    pub freq: FrequencyRange,
    #[serde(flatten)]
    pub times: CpuTimes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuTimes {
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub user: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub nice: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub system: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub idle: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyRange {
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub cur: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub min: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub max: f64,
}

// ============================================================================
// GPU
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuDomain {
    pub gpu: GpuDevice,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuDevice {
    pub status: GpuStatus,
    pub freq: GpuFrequency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuStatus {
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub load: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuFrequency {
    #[serde(flatten)]
    pub range: FrequencyRange,
    /// Graphics processing cluster frequencies, only on some modules
    #[serde(rename = "GPC", deserialize_with = "defaults::lenient_number_list")]
    pub gpc: Vec<f64>,
}

// ============================================================================
// Memory
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryDomain {
    #[serde(rename = "RAM")]
    pub ram: RamStats,
    #[serde(rename = "SWAP")]
    pub swap: SwapStats,
    #[serde(rename = "EMC")]
    pub emc: EmcStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RamStats {
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub tot: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub used: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub free: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub buffers: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub cached: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub shared: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapStats {
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub tot: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub used: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub cached: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmcStats {
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub cur: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub max: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub min: f64,
}

// ============================================================================
// Power
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerDomain {
    pub rail: BTreeMap<String, PowerRail>,
    pub tot: PowerTotal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerRail {
    #[serde(deserialize_with = "defaults::lenient_flag")]
    pub online: bool,
    /// millivolts
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub volt: f64,
    /// milliamps
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub curr: f64,
    /// milliwatts
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub power: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub avg: f64,
    /// Warning threshold in milliwatts, when the agent reports one
    #[serde(deserialize_with = "defaults::lenient_optional_number")]
    pub warn: Option<f64>,
    /// Boolean critical flag, when the agent reports one
    #[serde(deserialize_with = "defaults::strict_optional_flag")]
    pub crit: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerTotal {
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub power: f64,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub avg: f64,
}

// ============================================================================
// Temperature / Fan
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureSensor {
    #[serde(deserialize_with = "defaults::lenient_flag")]
    pub online: bool,
    #[serde(deserialize_with = "defaults::lenient_number")]
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanReading {
    #[serde(deserialize_with = "defaults::lenient_number_list")]
    pub speed: Vec<f64>,
    #[serde(deserialize_with = "defaults::lenient_number_list")]
    pub rpm: Vec<f64>,
    #[serde(deserialize_with = "defaults::lenient_text")]
    pub profile: String,
    #[serde(deserialize_with = "defaults::lenient_text")]
    pub governor: String,
    #[serde(deserialize_with = "defaults::lenient_text")]
    pub control: String,
}

impl Default for FanReading {
    fn default() -> Self {
        Self {
            speed: Vec::new(),
            rpm: Vec::new(),
            profile: defaults::text(),
            governor: defaults::text(),
            control: defaults::text(),
        }
    }
}

impl FanReading {
    /// First reported speed, in percent.
    pub fn speed_percent(&self) -> f64 {
        self.speed.first().copied().unwrap_or_else(defaults::number)
    }

    pub fn rpm(&self) -> f64 {
        self.rpm.first().copied().unwrap_or_else(defaults::number)
    }
}

// ============================================================================
// Decoding
// ============================================================================

impl TelemetrySnapshot {
    /// Decode a snapshot document, domain by domain.
    pub fn from_value(value: Value) -> Self {
        let mut root = match value {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                log::warn!(
                    "Telemetry snapshot is not an object ({}), using empty snapshot",
                    type_name(&other)
                );
                Map::new()
            }
        };

        TelemetrySnapshot {
            cpu: decode_domain(&mut root, "cpu").unwrap_or_default(),
            gpu: decode_domain(&mut root, "gpu").unwrap_or_default(),
            memory: decode_domain(&mut root, "memory").unwrap_or_default(),
            power: decode_domain(&mut root, "power").unwrap_or_default(),
            temperature: decode_domain(&mut root, "temperature").unwrap_or_default(),
            fan: decode_domain(&mut root, "fan"),
            processes: decode_domain(&mut root, "processes").unwrap_or_default(),
            stats: decode_domain(&mut root, "stats").unwrap_or_default(),
            uptime_secs: root.get("uptime").and_then(defaults::as_number),
            nvpmodel: root.get("nvpmodel").and_then(decode_nvpmodel),
            jetson_clocks: root
                .get("jetson_clocks")
                .and_then(decode_jetson_clocks)
                .unwrap_or_else(defaults::flag),
        }
    }

    pub fn from_json_str(data: &str) -> crate::error::Result<Self> {
        let value: Value = serde_json::from_str(data)?;
        Ok(Self::from_value(value))
    }
}

fn decode_domain<T>(root: &mut Map<String, Value>, key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
{
    let value = root.remove(key)?;
    if value.is_null() {
        return None;
    }

    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::warn!("Failed to decode '{}' telemetry domain: {}", key, e);
            None
        }
    }
}

fn decode_nvpmodel(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.get("name").and_then(defaults::as_text),
        Value::Null => None,
        other => defaults::as_text(other),
    }
}

fn decode_jetson_clocks(value: &Value) -> Option<bool> {
    match value {
        Value::Object(map) => map
            .get("status")
            .or_else(|| map.get("enabled"))
            .and_then(defaults::as_flag),
        other => defaults::as_flag(other),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
