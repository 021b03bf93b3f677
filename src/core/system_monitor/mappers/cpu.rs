use crate::core::system_monitor::metrics::MetricRecord;
use crate::core::telemetry::{CpuDomain, CpuTimes};
use crate::labels;

pub const TOTAL_CORE_LABEL: &str = "total";

/// `cpu_Hz{core,statistic}` and `cpu_utilization_percent{core,mode}`.
///
/// Offline cores contribute no rows. The aggregate block, when present,
/// adds utilization rows under core "total".
pub fn cpu_metrics(cpu: &CpuDomain) -> Vec<MetricRecord> {
    let mut frequency = MetricRecord::new(
        "cpu_Hz",
        "CPU frequency statistics per core",
        &["core", "statistic"],
    )
    .with_unit("Hz");

    let mut utilization = MetricRecord::new(
        "cpu_utilization_percent",
        "CPU usage percentage per core and total",
        &["core", "mode"],
    )
    .with_unit("percent");

    for (index, core) in cpu.cores.iter().enumerate() {
        if !core.online {
            continue;
        }

        frequency.add_sample(labels![index, "cur"], core.freq.cur);
        frequency.add_sample(labels![index, "min"], core.freq.min);
        frequency.add_sample(labels![index, "max"], core.freq.max);

        add_times(&mut utilization, &index.to_string(), &core.times);
    }

    if let Some(total) = &cpu.total {
        add_times(&mut utilization, TOTAL_CORE_LABEL, total);
    }

    log::debug!(
        "cpu: {} frequency rows, {} utilization rows",
        frequency.len(),
        utilization.len()
    );

    vec![frequency, utilization]
}

fn add_times(record: &mut MetricRecord, core: &str, times: &CpuTimes) {
    record.add_sample(labels![core, "user"], times.user);
    record.add_sample(labels![core, "nice"], times.nice);
    record.add_sample(labels![core, "system"], times.system);
    record.add_sample(labels![core, "idle"], times.idle);
}
