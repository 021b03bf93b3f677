//! OS resource counters: mount point usage and network byte counters.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use sysinfo::{Disks, Networks};

/// Usage of one mount point, in bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MountUsage {
    pub mount_point: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    /// Free blocks, including those reserved for root
    pub available_bytes: u64,
    /// Blocks available to unprivileged users
    pub available_no_root_bytes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceCounters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Cumulative per-interface counters observed at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkCounters {
    pub sampled_at: DateTime<Utc>,
    pub interfaces: BTreeMap<String, InterfaceCounters>,
}

impl NetworkCounters {
    pub fn empty_at(sampled_at: DateTime<Utc>) -> Self {
        Self {
            sampled_at,
            interfaces: BTreeMap::new(),
        }
    }
}

/// Trait for OS resource-accounting providers
pub trait SystemCounters: Send {
    /// Usage of every mounted filesystem
    fn disk_usage(&mut self) -> Vec<MountUsage>;

    /// Current cumulative network counters, stamped with the wall-clock time
    fn network_counters(&mut self) -> NetworkCounters;
}

/// Counters read through sysinfo
pub struct SysinfoCounters {
    disks: Disks,
    networks: Networks,
}

impl SysinfoCounters {
    pub fn new() -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCounters for SysinfoCounters {
    fn disk_usage(&mut self) -> Vec<MountUsage> {
        // Re-reads the mount table: new mounts are added, vanished ones dropped
        self.disks.refresh(true);

        self.disks
            .list()
            .iter()
            .map(|disk| {
                let mount_point = disk.mount_point();
                statvfs_usage(mount_point).unwrap_or_else(|| {
                    let total = disk.total_space();
                    let available = disk.available_space();

                    MountUsage {
                        mount_point: mount_point.to_string_lossy().to_string(),
                        total_bytes: total,
                        used_bytes: total.saturating_sub(available),
                        available_bytes: available,
                        available_no_root_bytes: available,
                    }
                })
            })
            .collect()
    }

    fn network_counters(&mut self) -> NetworkCounters {
        self.networks.refresh(true);

        NetworkCounters {
            sampled_at: Utc::now(),
            interfaces: self
                .networks
                .iter()
                .map(|(name, data)| {
                    (
                        name.to_string(),
                        InterfaceCounters {
                            rx_bytes: data.total_received(),
                            tx_bytes: data.total_transmitted(),
                        },
                    )
                })
                .collect(),
        }
    }
}

#[cfg(unix)]
fn statvfs_usage(mount_point: &Path) -> Option<MountUsage> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(mount_point.as_os_str().as_bytes()).ok()?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };

    if unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) } != 0 {
        log::debug!("statvfs failed for {:?}", mount_point);
        return None;
    }

    let fragment = stat.f_frsize as u64;
    let total = (stat.f_blocks as u64).saturating_mul(fragment);
    let free = (stat.f_bfree as u64).saturating_mul(fragment);
    let available = (stat.f_bavail as u64).saturating_mul(fragment);

    Some(MountUsage {
        mount_point: mount_point.to_string_lossy().to_string(),
        total_bytes: total,
        used_bytes: total.saturating_sub(free),
        available_bytes: free,
        available_no_root_bytes: available,
    })
}

#[cfg(not(unix))]
fn statvfs_usage(_mount_point: &Path) -> Option<MountUsage> {
    None
}
