//! Prometheus text exposition of collected metric records.

use prometheus::proto::{Gauge, LabelPair, Metric, MetricFamily, MetricType};
use prometheus::{Encoder, TextEncoder};

use crate::core::system_monitor::MetricRecord;
use crate::error::{ExporterError, Result};

/// Content type of the `/metrics` response
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

fn to_metric_family(record: &MetricRecord) -> MetricFamily {
    let mut family = MetricFamily::default();
    family.set_name(record.exposed_name());
    family.set_help(record.documentation.clone());
    family.set_field_type(MetricType::GAUGE);

    for sample in &record.samples {
        let mut metric = Metric::default();
        for (name, value) in record.label_names.iter().zip(&sample.labels) {
            let mut pair = LabelPair::default();
            pair.set_name(name.clone());
            pair.set_value(value.render());
            metric.mut_label().push(pair);
        }

        let mut gauge = Gauge::default();
        gauge.set_value(sample.value);
        metric.set_gauge(gauge);

        family.mut_metric().push(metric);
    }

    family
}

/// Convert records to protobuf families, one per record, in collection order.
pub fn to_metric_families(records: &[MetricRecord]) -> Vec<MetricFamily> {
    records.iter().map(to_metric_family).collect()
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Render records in the Prometheus text format, in collection order.
///
/// Families without rows still get their `# HELP`/`# TYPE` header;
/// `TextEncoder` refuses them, so those lines are written here.
pub fn encode_text(records: &[MetricRecord]) -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    for family in to_metric_families(records) {
        if family.get_metric().is_empty() {
            let name = family.get_name();
            let header = format!(
                "# HELP {} {}\n# TYPE {} gauge\n",
                name,
                escape_help(family.get_help()),
                name
            );
            buffer.extend_from_slice(header.as_bytes());
        } else {
            encoder.encode(std::slice::from_ref(&family), &mut buffer)?;
        }
    }

    String::from_utf8(buffer)
        .map_err(|e| ExporterError::exposition(format!("encoder produced invalid UTF-8: {}", e)))
}
