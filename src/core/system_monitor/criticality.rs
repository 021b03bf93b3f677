//! Health labels derived from raw sensor flags and thresholds.

/// Readings at or below this value mark a disconnected or invalid sensor.
pub const TEMPERATURE_SENTINEL_FLOOR: f64 = -255.0;

/// Rail warning thresholds above this value are treated as tripped.
/// 32760 mW is what the INA3221 reports when no alarm is configured.
pub const RAIL_WARN_CEILING_MW: f64 = 32_760.0;

/// The warning signal a power rail carries, depending on agent version
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RailSignal {
    /// Explicit critical flag
    Flag(bool),
    /// Numeric warning threshold, in milliwatts
    Threshold(f64),
    Missing,
}

impl RailSignal {
    /// Prefer the boolean flag; fall back to the numeric threshold.
    pub fn from_fields(crit: Option<bool>, warn: Option<f64>) -> Self {
        match (crit, warn) {
            (Some(flag), _) => RailSignal::Flag(flag),
            (None, Some(threshold)) => RailSignal::Threshold(threshold),
            (None, None) => RailSignal::Missing,
        }
    }
}

pub fn temperature_critical(temp: f64, online: bool) -> bool {
    !online || temp.is_nan() || temp <= TEMPERATURE_SENTINEL_FLOOR
}

pub fn power_rail_critical(online: bool, signal: RailSignal) -> bool {
    if !online {
        return true;
    }

    match signal {
        RailSignal::Flag(flag) => flag,
        RailSignal::Threshold(threshold) => threshold > RAIL_WARN_CEILING_MW,
        RailSignal::Missing => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_sensor_is_critical() {
        assert!(temperature_critical(-999.0, false));
        assert!(temperature_critical(45.0, false));
    }

    #[test]
    fn test_online_sensor_in_range() {
        assert!(!temperature_critical(45.0, true));
        assert!(!temperature_critical(-254.9, true));
    }

    #[test]
    fn test_sentinel_floor_inclusive() {
        assert!(temperature_critical(-255.0, true));
        assert!(temperature_critical(-256.0, true));
    }

    #[test]
    fn test_rail_flag_takes_precedence() {
        let signal = RailSignal::from_fields(Some(false), Some(99_999.0));
        assert_eq!(signal, RailSignal::Flag(false));
        assert!(!power_rail_critical(true, signal));
        assert!(power_rail_critical(true, RailSignal::Flag(true)));
    }

    #[test]
    fn test_rail_threshold_fallback() {
        assert!(!power_rail_critical(true, RailSignal::from_fields(None, Some(32_760.0))));
        assert!(power_rail_critical(true, RailSignal::from_fields(None, Some(32_761.0))));
        assert!(!power_rail_critical(true, RailSignal::from_fields(None, None)));
    }

    #[test]
    fn test_offline_rail_is_critical() {
        assert!(power_rail_critical(false, RailSignal::Flag(false)));
        assert!(power_rail_critical(false, RailSignal::Missing));
    }
}
