//! Observation - one vessel/weather time step as received from the
//! transport layer
//!
//! Immutable once received. Feature values are read by schema name through
//! [`Observation::feature`]; the struct's own field order carries no meaning.

use serde::{Deserialize, Serialize};

/// Superset of both deployments' request rows. The single-row model does not
/// use `cog`/`heading`/`dsog`; the windowed model does not use `nav_status`/
/// `wind_deg`. Whether an optional field is actually required is decided by
/// the active feature order, not by this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Speed over ground (kt)
    pub sog: f64,

    // Weather at the current step
    pub ws_t: f64,
    pub wg_t: f64,
    pub temp_t: f64,
    pub prec_t: f64,

    // Weather forecast one step ahead
    pub ws_t1: f64,
    pub wg_t1: f64,
    pub temp_t1: f64,
    pub prec_t1: f64,

    // Observed deltas over the last hour
    pub d_ws_1h: f64,
    pub d_temp_1h: f64,

    pub hour_of_day: i32,
    pub weekday: i32,
    pub lat: f64,
    pub lon: f64,

    /// Course-over-ground delta (deg)
    pub dcog: f64,

    // Windowed-model-only kinematics
    #[serde(default)]
    pub cog: Option<f64>,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub dsog: Option<f64>,

    /// AIS navigational status code, when known
    #[serde(default)]
    pub nav_status: Option<i32>,

    /// True wind direction (deg), when known
    #[serde(default, alias = "windDeg")]
    pub wind_deg: Option<f64>,
}

impl Observation {
    /// Look up a feature value by schema name. Returns `None` when the
    /// observation cannot supply the name (unknown name, or an optional
    /// field that is absent).
    pub fn feature(&self, name: &str) -> Option<f64> {
        match name {
            "sog" => Some(self.sog),
            "ws_t" => Some(self.ws_t),
            "wg_t" => Some(self.wg_t),
            "temp_t" => Some(self.temp_t),
            "prec_t" => Some(self.prec_t),
            "ws_t1" => Some(self.ws_t1),
            "wg_t1" => Some(self.wg_t1),
            "temp_t1" => Some(self.temp_t1),
            "prec_t1" => Some(self.prec_t1),
            "d_ws_1h" => Some(self.d_ws_1h),
            "d_temp_1h" => Some(self.d_temp_1h),
            "hour_of_day" => Some(self.hour_of_day as f64),
            "weekday" => Some(self.weekday as f64),
            "lat" => Some(self.lat),
            "lon" => Some(self.lon),
            "dcog" => Some(self.dcog),
            "cog" => self.cog,
            "heading" => self.heading,
            "dsog" => self.dsog,
            _ => None,
        }
    }

    /// Forecast wind rise over the next hour (kt).
    pub fn wind_rise(&self) -> f64 {
        self.ws_t1 - self.ws_t
    }

    /// Forecast temperature drop over the next hour (positive = cooling).
    pub fn temp_drop(&self) -> f64 {
        self.temp_t - self.temp_t1
    }

    /// Worst gust across the current and next step (kt).
    pub fn gust_max(&self) -> f64 {
        self.wg_t.max(self.wg_t1)
    }

    /// Headwind component at the current step, if wind direction is known.
    pub fn headwind_now(&self) -> Option<f64> {
        headwind_component(Some(self.ws_t), Some(self.dcog), self.wind_deg)
    }

    /// Headwind component at the next step, if wind direction is known.
    pub fn headwind_next(&self) -> Option<f64> {
        headwind_component(Some(self.ws_t1), Some(self.dcog), self.wind_deg)
    }
}

/// Wrap an angle in degrees into [-180, 180).
fn wrap180(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Portion of wind speed acting directly against the vessel's course:
/// wind speed projected onto the course axis via the cosine of the wrapped
/// angular difference, clamped at 0 (a tailwind contributes nothing).
///
/// `None` when any input is absent. An undefined headwind is NOT zero;
/// downstream risk checks must skip it rather than treat it as calm.
pub fn headwind_component(
    ws: Option<f64>,
    cog_deg: Option<f64>,
    wind_deg: Option<f64>,
) -> Option<f64> {
    let ws = ws?;
    let cog_deg = cog_deg?;
    let wind_deg = wind_deg?;

    let delta = wrap180(wind_deg - cog_deg).abs();
    let comp = ws * delta.to_radians().cos();
    Some(comp.max(0.0))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Observation;

    /// Calm-conditions observation for tests; override fields as needed.
    pub fn calm_observation() -> Observation {
        Observation {
            sog: 8.0,
            ws_t: 10.0,
            wg_t: 12.0,
            temp_t: 18.0,
            prec_t: 0.0,
            ws_t1: 10.5,
            wg_t1: 12.5,
            temp_t1: 17.8,
            prec_t1: 0.0,
            d_ws_1h: 0.5,
            d_temp_1h: -0.2,
            hour_of_day: 14,
            weekday: 2,
            lat: 59.4,
            lon: 24.7,
            dcog: 12.0,
            cog: Some(12.0),
            heading: Some(11.0),
            dsog: Some(0.1),
            nav_status: Some(0),
            wind_deg: Some(20.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::calm_observation;
    use super::*;

    #[test]
    fn test_feature_lookup_by_name() {
        let obs = calm_observation();
        assert_eq!(obs.feature("sog"), Some(8.0));
        assert_eq!(obs.feature("ws_t1"), Some(10.5));
        assert_eq!(obs.feature("hour_of_day"), Some(14.0));
        assert_eq!(obs.feature("heading"), Some(11.0));
        assert_eq!(obs.feature("no_such_feature"), None);
    }

    #[test]
    fn test_optional_fields_absent() {
        let mut obs = calm_observation();
        obs.cog = None;
        obs.dsog = None;
        assert_eq!(obs.feature("cog"), None);
        assert_eq!(obs.feature("dsog"), None);
    }

    #[test]
    fn test_wrap180() {
        assert_eq!(wrap180(0.0), 0.0);
        assert_eq!(wrap180(190.0), -170.0);
        assert_eq!(wrap180(-190.0), 170.0);
        assert_eq!(wrap180(360.0), 0.0);
        assert_eq!(wrap180(540.0), -180.0);
    }

    #[test]
    fn test_headwind_near_head_on() {
        // ws=20 kt, course 10 deg, wind from 15 deg: delta = 5 deg
        let comp = headwind_component(Some(20.0), Some(10.0), Some(15.0)).unwrap();
        let expected = 20.0 * 5.0_f64.to_radians().cos();
        assert!((comp - expected).abs() < 1e-9);
    }

    #[test]
    fn test_headwind_tailwind_clamped() {
        // Wind dead astern projects negative; clamp to 0.
        let comp = headwind_component(Some(20.0), Some(0.0), Some(180.0)).unwrap();
        assert_eq!(comp, 0.0);
    }

    #[test]
    fn test_headwind_undefined_when_direction_missing() {
        // Undefined is None, never coerced to 0.
        assert_eq!(headwind_component(Some(20.0), Some(10.0), None), None);
        assert_eq!(headwind_component(None, Some(10.0), Some(15.0)), None);

        let mut obs = calm_observation();
        obs.wind_deg = None;
        assert_eq!(obs.headwind_now(), None);
        assert_eq!(obs.headwind_next(), None);
    }

    #[test]
    fn test_wind_deg_wire_alias() {
        let json = r#"{
            "sog": 8.0, "ws_t": 10.0, "wg_t": 12.0, "temp_t": 18.0,
            "prec_t": 0.0, "ws_t1": 10.5, "wg_t1": 12.5, "temp_t1": 17.8,
            "prec_t1": 0.0, "d_ws_1h": 0.5, "d_temp_1h": -0.2,
            "hour_of_day": 14, "weekday": 2, "lat": 59.4, "lon": 24.7,
            "dcog": 12.0, "windDeg": 45.0
        }"#;
        let obs: Observation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.wind_deg, Some(45.0));
    }
}
