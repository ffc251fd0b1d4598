//! Templated policy
//!
//! One fixed sentence per set alert. The emission order is fixed: the
//! reduce-speed advice always leads, the descriptive sentences follow in
//! label-set order. The final list is deduplicated preserving first-seen
//! order.

use std::collections::BTreeMap;

use super::{dedup_preserve_order, STABLE_CONDITIONS};

/// Emission order and wording. Reduce-speed is hoisted to the front so the
/// actionable advice precedes the descriptive sentences.
const SENTENCES: &[(&str, &str)] = &[
    (
        "lbl_recommend_reduce_speed",
        "Model suggests reducing speed due to upcoming weather/traffic changes.",
    ),
    (
        "lbl_wind_up_12kt_1h",
        "Wind speed is likely to increase noticeably within the next hour on current track.",
    ),
    (
        "lbl_gusts_ge_25kt",
        "Strong gusts above 25 kt are likely; consider securing deck and reviewing course.",
    ),
    (
        "lbl_temp_drop_3c_1h",
        "Air temperature is likely to drop noticeably within the next hour.",
    ),
    (
        "lbl_precip_start_1h",
        "Precipitation is likely to start within the next hour along the current route.",
    ),
    (
        "lbl_abrupt_turn",
        "Model flags potential abrupt course change; monitor steering and traffic around.",
    ),
    (
        "lbl_abrupt_speed",
        "Model flags potential abrupt speed change; review engine orders and surrounding traffic.",
    ),
    (
        "lbl_dense_traffic",
        "Model indicates possible dense traffic region ahead; increase lookout and monitoring.",
    ),
];

/// One sentence per set alert, deduplicated, never empty.
pub fn synthesize(alerts: &BTreeMap<String, u8>) -> Vec<String> {
    let mut recs = Vec::new();
    for (label, sentence) in SENTENCES {
        if alerts.get(*label).copied() == Some(1) {
            recs.push((*sentence).to_string());
        }
    }

    let recs = dedup_preserve_order(recs);
    if recs.is_empty() {
        return vec![STABLE_CONDITIONS.to_string()];
    }
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alerts(set: &[&str]) -> BTreeMap<String, u8> {
        let mut map: BTreeMap<String, u8> = SENTENCES
            .iter()
            .map(|(label, _)| (label.to_string(), 0))
            .collect();
        for label in set {
            map.insert(label.to_string(), 1);
        }
        map
    }

    #[test]
    fn test_no_alerts_yields_stable_sentence_only() {
        let recs = synthesize(&alerts(&[]));
        assert_eq!(recs, vec![STABLE_CONDITIONS.to_string()]);
    }

    #[test]
    fn test_reduce_speed_leads() {
        let recs = synthesize(&alerts(&["lbl_dense_traffic", "lbl_recommend_reduce_speed"]));
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("Model suggests reducing speed"));
        assert!(recs[1].contains("dense traffic"));
    }

    #[test]
    fn test_fixed_emission_order() {
        let recs = synthesize(&alerts(&[
            "lbl_precip_start_1h",
            "lbl_wind_up_12kt_1h",
            "lbl_abrupt_turn",
        ]));
        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("Wind speed"));
        assert!(recs[1].contains("Precipitation"));
        assert!(recs[2].contains("abrupt course change"));
    }

    #[test]
    fn test_no_duplicates_and_idempotent() {
        let input = alerts(&["lbl_gusts_ge_25kt", "lbl_temp_drop_3c_1h"]);
        let first = synthesize(&input);
        let second = synthesize(&input);

        assert_eq!(first, second);
        for (i, s) in first.iter().enumerate() {
            assert!(!first[i + 1..].contains(s));
        }
    }

    #[test]
    fn test_unknown_alert_labels_ignored() {
        let mut map = alerts(&["lbl_precip_start_1h"]);
        map.insert("lbl_not_in_this_deployment".to_string(), 1);
        let recs = synthesize(&map);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("Precipitation"));
    }
}
