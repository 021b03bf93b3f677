use crate::core::system_monitor::criticality::{power_rail_critical, RailSignal};
use crate::core::system_monitor::metrics::MetricRecord;
use crate::core::telemetry::PowerDomain;
use crate::labels;

const RAIL_LABELS: &[&str] = &["machine_part", "online", "critical"];

/// Per-rail families, each row labelled with online/critical.
pub fn power_rail_metrics(power: &PowerDomain) -> Vec<MetricRecord> {
    let mut voltage = MetricRecord::new(
        "power_voltage_millivolts",
        "Rail voltage from the internal power monitors",
        RAIL_LABELS,
    );
    let mut current = MetricRecord::new(
        "power_current_milliamps",
        "Rail current from the internal power monitors",
        RAIL_LABELS,
    );
    let mut consumption = MetricRecord::new(
        "power_consumption_milliwatts",
        "Instantaneous rail power",
        RAIL_LABELS,
    );
    let mut average = MetricRecord::new(
        "power_average_milliwatts",
        "Average rail power",
        RAIL_LABELS,
    );
    let mut warn_threshold = MetricRecord::new(
        "power_warn_threshold_milliwatts",
        "Rail warning threshold",
        RAIL_LABELS,
    );

    for (part, rail) in &power.rail {
        let critical = power_rail_critical(rail.online, RailSignal::from_fields(rail.crit, rail.warn));

        voltage.add_sample(labels![part, rail.online, critical], rail.volt);
        current.add_sample(labels![part, rail.online, critical], rail.curr);
        consumption.add_sample(labels![part, rail.online, critical], rail.power);
        average.add_sample(labels![part, rail.online, critical], rail.avg);
        warn_threshold.add_sample(
            labels![part, rail.online, critical],
            rail.warn.unwrap_or_default(),
        );
    }

    vec![voltage, current, consumption, average, warn_threshold]
}

/// Whole-board power, no per-rail labels.
pub fn power_total_metrics(power: &PowerDomain) -> Vec<MetricRecord> {
    let mut total = MetricRecord::new(
        "power_total_milliwatts",
        "Total board power consumption",
        &["statistic"],
    );

    total.add_sample(labels!["power"], power.tot.power);
    total.add_sample(labels!["average"], power.tot.avg);

    vec![total]
}
