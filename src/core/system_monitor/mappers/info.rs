//! Single-row informational families: nvpmodel, uptime, jetson_clocks.

use crate::core::system_monitor::metrics::MetricRecord;
use crate::labels;

pub fn nvpmodel_metrics(model: Option<&str>) -> Vec<MetricRecord> {
    let mut record = MetricRecord::new("nvpmodel_info", "Active NV power model", &["model"]);

    if let Some(model) = model {
        record.add_sample(labels![model], 1.0);
    }

    vec![record]
}

pub fn uptime_metrics(uptime_secs: Option<f64>) -> Vec<MetricRecord> {
    let mut record = MetricRecord::new("uptime", "Machine uptime", &["statistic"]).with_unit("s");
    record.add_sample(labels!["alive"], uptime_secs.unwrap_or_default());
    vec![record]
}

pub fn jetson_clocks_metrics(enabled: bool) -> Vec<MetricRecord> {
    let mut record = MetricRecord::new(
        "jetson_clocks",
        "Whether jetson_clocks pins clocks to their maximum",
        &["enabled"],
    );
    record.add_sample(labels![enabled], if enabled { 1.0 } else { 0.0 });
    vec![record]
}
