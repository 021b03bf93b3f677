use std::collections::BTreeMap;

use crate::core::system_monitor::criticality::temperature_critical;
use crate::core::system_monitor::metrics::MetricRecord;
use crate::core::telemetry::TemperatureSensor;
use crate::labels;

pub fn temperature_metrics(sensors: &BTreeMap<String, TemperatureSensor>) -> Vec<MetricRecord> {
    let mut record = MetricRecord::new(
        "temperature",
        "Temperature statistics from the telemetry agent (unit: °C)",
        &["statistic", "machine_part", "system_critical"],
    )
    .with_unit("C");

    for (part, sensor) in sensors {
        let critical = temperature_critical(sensor.temp, sensor.online);
        if critical {
            log::debug!("Temperature sensor {} flagged critical ({})", part, sensor.temp);
        }

        record.add_sample(labels!["temp", part, critical], sensor.temp);
    }

    vec![record]
}
