//! Model schema - feature order and label set
//!
//! The ordered name tables below are the SINGLE SOURCE OF TRUTH for the
//! column order the classifier consumes and the meaning of its output
//! columns. Feature values are always looked up BY NAME against these
//! tables; column order is part of the model contract and is never derived
//! from a struct's field order.

use serde::{Deserialize, Serialize};

/// Window length for the windowed (time-series) deployment.
pub const WINDOW: usize = 8;

/// Feature order for the single-row deployment (16 columns).
pub const ROW_FEATURES: &[&str] = &[
    "sog",
    "ws_t", "wg_t", "temp_t", "prec_t",
    "ws_t1", "wg_t1", "temp_t1", "prec_t1",
    "d_ws_1h", "d_temp_1h",
    "hour_of_day", "weekday",
    "lat", "lon",
    "dcog",
];

/// Label set for the single-row deployment (5 outputs).
pub const ROW_LABELS: &[&str] = &[
    "lbl_wind_up_12kt_1h",
    "lbl_gusts_ge_25kt",
    "lbl_temp_drop_3c_1h",
    "lbl_precip_start_1h",
    "lbl_recommend_reduce_speed",
];

/// Feature order for the windowed deployment (19 columns per time step).
pub const WINDOW_FEATURES: &[&str] = &[
    "lat",
    "lon",
    "sog",
    "cog",
    "heading",
    "ws_t",
    "wg_t",
    "temp_t",
    "prec_t",
    "ws_t1",
    "wg_t1",
    "temp_t1",
    "prec_t1",
    "d_ws_1h",
    "d_temp_1h",
    "dcog",
    "dsog",
    "hour_of_day",
    "weekday",
];

/// Label set for the windowed deployment (8 outputs).
pub const WINDOW_LABELS: &[&str] = &[
    "lbl_wind_up_12kt_1h",
    "lbl_gusts_ge_25kt",
    "lbl_temp_drop_3c_1h",
    "lbl_precip_start_1h",
    "lbl_recommend_reduce_speed",
    "lbl_abrupt_turn",
    "lbl_abrupt_speed",
    "lbl_dense_traffic",
];

/// Which trained model the service fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelMode {
    /// One observation per request, 16 features, 5 labels.
    Row,
    /// Window of [`WINDOW`] observations, 19 features, 8 labels.
    Window,
}

/// Feature order + label set for one deployment, fixed at startup.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSchema {
    pub mode: ModelMode,
    pub features: &'static [&'static str],
    pub labels: &'static [&'static str],
    /// Required window length; `None` for the single-row model.
    pub window: Option<usize>,
}

impl ModelSchema {
    pub fn row() -> Self {
        Self {
            mode: ModelMode::Row,
            features: ROW_FEATURES,
            labels: ROW_LABELS,
            window: None,
        }
    }

    pub fn window() -> Self {
        Self {
            mode: ModelMode::Window,
            features: WINDOW_FEATURES,
            labels: WINDOW_LABELS,
            window: Some(WINDOW),
        }
    }

    pub fn for_mode(mode: ModelMode) -> Self {
        match mode {
            ModelMode::Row => Self::row(),
            ModelMode::Window => Self::window(),
        }
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Column index of a feature name (O(n), the tables are small).
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|&n| n == name)
    }

    pub fn label_index(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|&n| n == name)
    }
}
