use std::collections::BTreeMap;

use crate::core::system_monitor::metrics::MetricRecord;
use crate::core::telemetry::FanReading;
use crate::labels;

/// Speed, RPM and configuration per fan. No fan domain means three empty families.
pub fn fan_metrics(fans: Option<&BTreeMap<String, FanReading>>) -> Vec<MetricRecord> {
    let mut speed = MetricRecord::new("fan_speed_percent", "Fan speed", &["fan"]).with_unit("percent");
    let mut rpm = MetricRecord::new("fan_rpm", "Fan rotations per minute", &["fan"]);
    let mut config = MetricRecord::new(
        "fan_config_info",
        "Fan profile, governor and control mode",
        &["fan", "profile", "governor", "control"],
    );

    for (name, fan) in fans.into_iter().flatten() {
        speed.add_sample(labels![name], fan.speed_percent());
        rpm.add_sample(labels![name], fan.rpm());
        config.add_sample(
            labels![name, &fan.profile, &fan.governor, &fan.control],
            1.0,
        );
    }

    vec![speed, rpm, config]
}
