//! Disk usage normalization: bytes to the display unit, root mount selection.

use serde::Serialize;
use std::collections::BTreeMap;

use super::counters::MountUsage;

/// Mount point reported as "the disk"
pub const ROOT_MOUNT_POINT: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayUnit {
    pub label: &'static str,
    pub bytes_per_unit: u64,
}

pub const GIGABYTE: DisplayUnit = DisplayUnit {
    label: "GB",
    bytes_per_unit: 1_000_000_000,
};

/// Usage of one mount point in the display unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DiskUsageReading {
    pub total: f64,
    pub used: f64,
    pub available: f64,
    pub available_no_root: f64,
}

#[derive(Debug, Clone)]
pub struct DiskUsageNormalizer {
    unit: DisplayUnit,
}

impl DiskUsageNormalizer {
    pub fn new() -> Self {
        Self::with_unit(GIGABYTE)
    }

    pub fn with_unit(unit: DisplayUnit) -> Self {
        Self { unit }
    }

    pub fn unit_label(&self) -> &'static str {
        self.unit.label
    }

    /// Convert one mount point's byte counts
    pub fn convert(&self, usage: &MountUsage) -> DiskUsageReading {
        let factor = self.unit.bytes_per_unit as f64;

        DiskUsageReading {
            total: usage.total_bytes as f64 / factor,
            used: usage.used_bytes as f64 / factor,
            available: usage.available_bytes as f64 / factor,
            available_no_root: usage.available_no_root_bytes as f64 / factor,
        }
    }

    /// Every mount point, keyed by path
    pub fn normalize_all(&self, mounts: &[MountUsage]) -> BTreeMap<String, DiskUsageReading> {
        mounts
            .iter()
            .map(|usage| (usage.mount_point.clone(), self.convert(usage)))
            .collect()
    }

    /// The root mount point reading, zeroed when root is not among `mounts`.
    pub fn normalize(&self, mounts: &[MountUsage]) -> (DiskUsageReading, &'static str) {
        let reading = mounts
            .iter()
            .find(|usage| usage.mount_point == ROOT_MOUNT_POINT)
            .map(|usage| self.convert(usage))
            .unwrap_or_else(|| {
                log::debug!("Root mount point not reported, disk reading zeroed");
                DiskUsageReading::default()
            });

        (reading, self.unit.label)
    }
}

impl Default for DiskUsageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
