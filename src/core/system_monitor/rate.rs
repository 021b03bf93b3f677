//! Network bandwidth from cumulative byte counters.
//!
//! The tracker retains exactly one previous sample. Every call to
//! [`RateTracker::compute`] diffs against it and then replaces it.

use serde::Serialize;
use std::collections::BTreeMap;

use super::counters::NetworkCounters;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InterfaceRate {
    pub rx_bytes_per_sec: f64,
    pub tx_bytes_per_sec: f64,
}

#[derive(Debug, Clone)]
pub struct RateTracker {
    previous: NetworkCounters,
}

impl RateTracker {
    /// Seed the tracker so the first `compute` already has a baseline.
    pub fn new(initial: NetworkCounters) -> Self {
        Self { previous: initial }
    }

    pub fn previous(&self) -> &NetworkCounters {
        &self.previous
    }

    /// Per-interface rates since the previous sample.
    ///
    /// Interfaces missing from either side get no entry. A non-positive
    /// interval yields 0 for every interface present on both sides.
    pub fn compute(&mut self, current: NetworkCounters) -> BTreeMap<String, InterfaceRate> {
        let elapsed_secs = current
            .sampled_at
            .signed_duration_since(self.previous.sampled_at)
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or(0.0);

        if elapsed_secs <= 0.0 {
            log::warn!(
                "Non-positive network sampling interval ({:.6}s), reporting zero bandwidth",
                elapsed_secs
            );
        }

        let rates = current
            .interfaces
            .iter()
            .filter_map(|(name, counters)| {
                let prev = self.previous.interfaces.get(name)?;

                let rate = if elapsed_secs > 0.0 {
                    // Counter resets read as no traffic rather than negative traffic
                    let rx_diff = counters.rx_bytes.saturating_sub(prev.rx_bytes);
                    let tx_diff = counters.tx_bytes.saturating_sub(prev.tx_bytes);

                    InterfaceRate {
                        rx_bytes_per_sec: rx_diff as f64 / elapsed_secs,
                        tx_bytes_per_sec: tx_diff as f64 / elapsed_secs,
                    }
                } else {
                    InterfaceRate::default()
                };

                Some((name.clone(), rate))
            })
            .collect();

        self.previous = current;
        rates
    }
}
