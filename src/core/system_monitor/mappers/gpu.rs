use crate::core::system_monitor::metrics::MetricRecord;
use crate::core::telemetry::GpuDomain;
use crate::labels;

/// Jetson modules expose a single integrated GPU
pub const GPU_NAME: &str = "integrated";

pub fn gpu_metrics(gpu: &GpuDomain) -> Vec<MetricRecord> {
    let device = &gpu.gpu;

    let mut utilization = MetricRecord::new(
        "gpu_utilization_percent",
        "GPU load utilization percentage",
        &["gpu"],
    )
    .with_unit("percent");
    utilization.add_sample(labels![GPU_NAME], device.status.load);

    let mut frequency = MetricRecord::new(
        "gpu_frequency_hz",
        "GPU frequency statistics",
        &["gpu", "statistic"],
    )
    .with_unit("Hz");
    frequency.add_sample(labels![GPU_NAME, "cur"], device.freq.range.cur);
    frequency.add_sample(labels![GPU_NAME, "min"], device.freq.range.min);
    frequency.add_sample(labels![GPU_NAME, "max"], device.freq.range.max);

    if let Some(gpc0) = device.freq.gpc.first() {
        frequency.add_sample(labels![GPU_NAME, "gpc0"], *gpc0);
    }

    vec![utilization, frequency]
}
