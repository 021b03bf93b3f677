use crate::core::system_monitor::metrics::MetricRecord;
use crate::core::telemetry::MemoryDomain;
use crate::labels;

/// `ram`, `swap` and `emc` families, each a fixed set of statistics.
pub fn memory_metrics(memory: &MemoryDomain) -> Vec<MetricRecord> {
    vec![ram(memory), swap(memory), emc(memory)]
}

fn ram(memory: &MemoryDomain) -> MetricRecord {
    let ram = &memory.ram;
    let mut record = MetricRecord::new(
        "ram",
        "Memory statistics from the telemetry agent (unit: kB)",
        &["statistic"],
    )
    .with_unit("kB");

    record.add_sample(labels!["total"], ram.tot);
    record.add_sample(labels!["used"], ram.used);
    record.add_sample(labels!["free"], ram.free);
    record.add_sample(labels!["buffers"], ram.buffers);
    record.add_sample(labels!["cached"], ram.cached);
    record.add_sample(labels!["shared"], ram.shared);
    record
}

fn swap(memory: &MemoryDomain) -> MetricRecord {
    let swap = &memory.swap;
    let mut record = MetricRecord::new(
        "swap",
        "Swap statistics from the telemetry agent (unit: kB)",
        &["statistic"],
    )
    .with_unit("kB");

    record.add_sample(labels!["total"], swap.tot);
    record.add_sample(labels!["used"], swap.used);
    record.add_sample(labels!["cached"], swap.cached);
    record
}

fn emc(memory: &MemoryDomain) -> MetricRecord {
    let emc = &memory.emc;
    let mut record = MetricRecord::new(
        "emc",
        "External memory controller frequency statistics",
        &["statistic"],
    )
    .with_unit("Hz");

    record.add_sample(labels!["cur"], emc.cur);
    record.add_sample(labels!["max"], emc.max);
    record.add_sample(labels!["min"], emc.min);
    record
}
