//! Corroborated policy
//!
//! Every flag needs two independent signals before it is voiced: the model
//! probability crossing the confidence bar AND the raw physical delta
//! crossing its own threshold. Probability alone is noisy near decision
//! boundaries; a flag without physical corroboration stays silent.

use std::collections::BTreeMap;

use crate::logic::observation::Observation;

use super::rules::SynthesisRules;
use super::{dedup_preserve_order, STABLE_CONDITIONS};

const WIND_SENTENCE: &str = "Wind is expected to strengthen within the next hour.";
const GUST_SENTENCE: &str = "Strong gusts may develop soon, reaching hazardous levels.";
const TEMP_SENTENCE: &str = "Air temperature is expected to drop within the next hour.";
const RAIN_SENTENCE: &str = "Rain is likely to begin within the next hour.";
const REDUCE_HEADWIND_SENTENCE: &str =
    "Reduce speed. Headwinds and unstable weather expected within 60 minutes.";
const REDUCE_GENERIC_SENTENCE: &str =
    "Reduce speed. Developing weather hazards expected within 60 minutes.";

fn prob(probs: &BTreeMap<String, f32>, label: &str) -> f32 {
    probs.get(label).copied().unwrap_or(0.0)
}

/// Synthesize guidance from probabilities plus the raw observation.
/// Deterministic; deduplicated; never empty.
pub fn synthesize(
    obs: &Observation,
    probs: &BTreeMap<String, f32>,
    rules: &SynthesisRules,
) -> Vec<String> {
    let wind_rise = obs.wind_rise();
    let temp_drop = obs.temp_drop();
    let gust_max = obs.gust_max();

    let wind_flag = prob(probs, "lbl_wind_up_12kt_1h") >= rules.confidence_bar
        && wind_rise >= rules.wind_rise_min_kt;
    let gust_flag = prob(probs, "lbl_gusts_ge_25kt") >= rules.confidence_bar
        && gust_max >= rules.gust_max_min_kt;
    let mut temp_flag = prob(probs, "lbl_temp_drop_3c_1h") >= rules.confidence_bar
        && temp_drop >= rules.temp_drop_min_c;
    // Rain has no raw-signal gate; precipitation onset is not observable in
    // the current readings.
    let rain_flag = prob(probs, "lbl_precip_start_1h") >= rules.confidence_bar;

    // An isolated extreme drop with nothing else moving is more likely a bad
    // sensor reading than a front.
    if temp_drop >= rules.extreme_temp_drop_c && !(wind_flag || gust_flag || rain_flag) {
        temp_flag = false;
    }

    // Undefined headwind (no wind direction) never counts as risky; it is
    // not the same as a zero headwind.
    let headwind_risky = match (obs.headwind_now(), obs.headwind_next()) {
        (Some(now), Some(next)) => now.max(next) >= rules.headwind_risk_kt,
        _ => false,
    };

    let mut parts: Vec<String> = Vec::new();

    if wind_flag {
        parts.push(WIND_SENTENCE.to_string());
    }
    if gust_flag {
        parts.push(GUST_SENTENCE.to_string());
    }
    if temp_flag {
        parts.push(TEMP_SENTENCE.to_string());
    }
    if rain_flag {
        parts.push(RAIN_SENTENCE.to_string());
    }

    // Speed advice only when it is actionable: the model asks for it, at
    // least one hazard is in play (a temperature drop counts only alongside
    // wind or gusts), and the vessel is actually making way.
    let reduce_ok = prob(probs, "lbl_recommend_reduce_speed") >= rules.confidence_bar;
    let hazard = wind_flag || gust_flag || rain_flag || (temp_flag && (wind_flag || gust_flag));
    let underway = obs.sog >= rules.underway_min_sog_kt;

    if reduce_ok && hazard && underway && !rules.is_moored(obs.nav_status) {
        let sentence = if headwind_risky {
            REDUCE_HEADWIND_SENTENCE
        } else {
            REDUCE_GENERIC_SENTENCE
        };
        // Actionable advice takes precedence over descriptive sentences.
        parts.insert(0, sentence.to_string());
    }

    let parts = dedup_preserve_order(parts);
    if parts.is_empty() {
        return vec![STABLE_CONDITIONS.to_string()];
    }
    parts
}
