//! Synthesis rules & thresholds
//!
//! All heuristic constants for the corroborated policy live here, not inside
//! the logic. The values are calibration choices carried over from the
//! deployed model, not derived truths; treat them as configuration.

use serde::{Deserialize, Serialize};

/// Model probability a flag must cross before corroboration is even
/// considered. Stricter than the alert thresholds; probabilities near the
/// decision boundary are noisy.
pub const CONFIDENCE_BAR: f32 = 0.60;

/// Forecast wind rise (kt over the next hour) corroborating the wind flag.
pub const WIND_RISE_MIN_KT: f64 = 12.0;

/// Max gust (kt, either time step) corroborating the gust flag.
pub const GUST_MAX_MIN_KT: f64 = 25.0;

/// Forecast temperature drop (deg C) corroborating the temperature flag.
pub const TEMP_DROP_MIN_C: f64 = 3.0;

/// A drop this large with no other hazard flagged reads as sensor noise,
/// not weather; the temperature flag is suppressed.
pub const EXTREME_TEMP_DROP_C: f64 = 7.0;

/// Projected headwind (kt, either time step) that switches the reduce-speed
/// wording to the headwind-specific phrasing.
pub const HEADWIND_RISK_KT: f64 = 15.0;

/// Minimum speed over ground (kt) for the vessel to count as underway.
pub const UNDERWAY_MIN_SOG_KT: f64 = 5.0;

/// AIS navigational statuses where speed advice is pointless:
/// 1 = at anchor, 5 = moored.
pub const MOORED_NAV_STATUSES: &[i32] = &[1, 5];

/// Configurable bundle of the constants above.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRules {
    pub confidence_bar: f32,
    pub wind_rise_min_kt: f64,
    pub gust_max_min_kt: f64,
    pub temp_drop_min_c: f64,
    pub extreme_temp_drop_c: f64,
    pub headwind_risk_kt: f64,
    pub underway_min_sog_kt: f64,
    pub moored_statuses: Vec<i32>,
}

impl Default for SynthesisRules {
    fn default() -> Self {
        Self {
            confidence_bar: CONFIDENCE_BAR,
            wind_rise_min_kt: WIND_RISE_MIN_KT,
            gust_max_min_kt: GUST_MAX_MIN_KT,
            temp_drop_min_c: TEMP_DROP_MIN_C,
            extreme_temp_drop_c: EXTREME_TEMP_DROP_C,
            headwind_risk_kt: HEADWIND_RISK_KT,
            underway_min_sog_kt: UNDERWAY_MIN_SOG_KT,
            moored_statuses: MOORED_NAV_STATUSES.to_vec(),
        }
    }
}

impl SynthesisRules {
    /// True when the status code means the vessel is not making way.
    pub fn is_moored(&self, nav_status: Option<i32>) -> bool {
        match nav_status {
            Some(code) => self.moored_statuses.contains(&code),
            // Unknown status never blocks the recommendation.
            None => false,
        }
    }
}
