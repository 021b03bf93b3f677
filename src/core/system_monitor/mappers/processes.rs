//! Process table rows.
//!
//! Each row is positional: `[pid, user, gpu, type, priority, state,
//! gpu_percent, memory_kb, rss_kb, name]`. Rows that do not fit that shape
//! are skipped one by one; the rest of the table is still reported.

use serde_json::Value;

use crate::core::system_monitor::metrics::MetricRecord;
use crate::core::telemetry::defaults;
use crate::error::{ExporterError, Result};
use crate::labels;

pub const PROCESS_ROW_LEN: usize = 10;

const PID: usize = 0;
const USER: usize = 1;
const GPU_PERCENT: usize = 6;
const MEMORY_KB: usize = 7;
const RSS_KB: usize = 8;
const NAME: usize = 9;

const PROCESS_LABELS: &[&str] = &["pid", "user", "name"];

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub pid: u32,
    pub user: String,
    pub name: String,
    pub gpu_percent: f64,
    pub memory_kb: f64,
    pub rss_kb: f64,
}

impl ProcessRow {
    pub fn parse(row: &Value) -> Result<Self> {
        let fields = row
            .as_array()
            .ok_or_else(|| ExporterError::malformed_row("process row is not a list"))?;

        if fields.len() != PROCESS_ROW_LEN {
            return Err(ExporterError::malformed_row(format!(
                "process row has {} fields, expected {}",
                fields.len(),
                PROCESS_ROW_LEN
            )));
        }

        let pid = defaults::as_number(&fields[PID])
            .filter(|pid| *pid >= 0.0 && pid.fract() == 0.0 && *pid <= u32::MAX as f64)
            .ok_or_else(|| ExporterError::malformed_row(format!("invalid pid {}", fields[PID])))?
            as u32;

        Ok(ProcessRow {
            pid,
            user: defaults::as_text(&fields[USER]).unwrap_or_else(defaults::text),
            name: defaults::as_text(&fields[NAME]).unwrap_or_else(defaults::text),
            gpu_percent: required_number(fields, GPU_PERCENT, "gpu_percent")?,
            memory_kb: required_number(fields, MEMORY_KB, "memory_kb")?,
            rss_kb: required_number(fields, RSS_KB, "rss_kb")?,
        })
    }
}

fn required_number(fields: &[Value], index: usize, field: &str) -> Result<f64> {
    defaults::as_number(&fields[index]).ok_or_else(|| {
        ExporterError::malformed_row(format!("non-numeric {}: {}", field, fields[index]))
    })
}

pub fn process_metrics(rows: &[Value]) -> Vec<MetricRecord> {
    let mut gpu = MetricRecord::new(
        "process_gpu_usage_percent",
        "GPU usage per process",
        PROCESS_LABELS,
    );
    let mut memory = MetricRecord::new(
        "process_memory_usage_kb",
        "Memory usage per process (kB)",
        PROCESS_LABELS,
    );
    let mut rss = MetricRecord::new(
        "process_memory_rss_kb",
        "Resident set size per process (kB)",
        PROCESS_LABELS,
    );

    let mut skipped = 0usize;

    for row in rows {
        let process = match ProcessRow::parse(row) {
            Ok(process) => process,
            Err(e) => {
                skipped += 1;
                log::warn!("Skipping process row: {}", e);
                continue;
            }
        };

        gpu.add_sample(
            labels![process.pid, &process.user, &process.name],
            process.gpu_percent,
        );
        memory.add_sample(
            labels![process.pid, &process.user, &process.name],
            process.memory_kb,
        );
        rss.add_sample(
            labels![process.pid, &process.user, &process.name],
            process.rss_kb,
        );
    }

    if skipped > 0 {
        log::debug!("{} of {} process rows skipped", skipped, rows.len());
    }

    vec![gpu, memory, rss]
}
