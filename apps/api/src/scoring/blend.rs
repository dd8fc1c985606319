//! Score validation and blending of model-reported and heuristic scores.

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;
pub const NEUTRAL_SCORE: u8 = 3;

/// Weight of the generative model's own score in the blend.
pub const MODEL_WEIGHT: f64 = 0.35;
/// Weight of the heuristic score in the blend. The heuristic dominates.
pub const HEURISTIC_WEIGHT: f64 = 0.65;

/// Rounds half away from zero, then clamps into [1, 5].
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return NEUTRAL_SCORE;
    }
    value
        .round()
        .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

pub fn in_range(raw: i64) -> bool {
    (i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&raw)
}

/// A model-reported category score; anything outside [1, 5] becomes neutral.
pub fn validate_model_score(raw: i64) -> u8 {
    if in_range(raw) {
        raw as u8
    } else {
        NEUTRAL_SCORE
    }
}

/// A model-reported overall score. Out of range, it is recomputed as the
/// truncated mean of the (already validated) category scores.
pub fn validate_overall_score(raw: i64, friend: u8, coworker: u8, partner: u8) -> u8 {
    if in_range(raw) {
        return raw as u8;
    }
    let mean = (u32::from(friend) + u32::from(coworker) + u32::from(partner)) / 3;
    if mean < u32::from(MIN_SCORE) {
        NEUTRAL_SCORE
    } else {
        mean.min(u32::from(MAX_SCORE)) as u8
    }
}

/// `clamp(round(0.35 * model + 0.65 * heuristic))`
pub fn blend_scores(model_score: u8, heuristic_score: u8) -> u8 {
    clamp_score(MODEL_WEIGHT * f64::from(model_score) + HEURISTIC_WEIGHT * f64::from(heuristic_score))
}

/// Overall score reported to callers, derived from the blended category scores.
pub fn derive_overall(friend: u8, coworker: u8, partner: u8) -> u8 {
    clamp_score((f64::from(friend) + f64::from(coworker) + f64::from(partner)) / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score_rounds_half_away_from_zero() {
        assert_eq!(clamp_score(3.5), 4);
        assert_eq!(clamp_score(2.49), 2);
        assert_eq!(clamp_score(4.5), 5);
    }

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(-7.0), 1);
        assert_eq!(clamp_score(0.4), 1);
        assert_eq!(clamp_score(9.2), 5);
        assert_eq!(clamp_score(f64::NAN), 3);
    }

    #[test]
    fn test_validate_model_score_forces_neutral() {
        assert_eq!(validate_model_score(9), 3);
        assert_eq!(validate_model_score(0), 3);
        assert_eq!(validate_model_score(-2), 3);
        assert_eq!(validate_model_score(1), 1);
        assert_eq!(validate_model_score(5), 5);
    }

    #[test]
    fn test_validate_overall_recomputes_truncated_mean() {
        assert_eq!(validate_overall_score(4, 1, 1, 1), 4);
        // (5 + 4 + 4) / 3 = 4.33 -> 4
        assert_eq!(validate_overall_score(0, 5, 4, 4), 4);
        // (2 + 2 + 3) / 3 = 2.33 -> 2
        assert_eq!(validate_overall_score(11, 2, 2, 3), 2);
    }

    #[test]
    fn test_validate_overall_floor_is_neutral() {
        assert_eq!(validate_overall_score(0, 0, 0, 0), 3);
    }

    #[test]
    fn test_blend_weights_heuristic() {
        // 0.35 * 3 + 0.65 * 4 = 3.65
        assert_eq!(blend_scores(3, 4), 4);
        // 0.35 * 5 + 0.65 * 1 = 2.4
        assert_eq!(blend_scores(5, 1), 2);
        // 0.35 * 1 + 0.65 * 5 = 3.6
        assert_eq!(blend_scores(1, 5), 4);
    }

    #[test]
    fn test_blend_output_always_in_range() {
        for model in MIN_SCORE..=MAX_SCORE {
            for heuristic in MIN_SCORE..=MAX_SCORE {
                let blended = blend_scores(model, heuristic);
                assert!(
                    (MIN_SCORE..=MAX_SCORE).contains(&blended),
                    "blend({model}, {heuristic}) = {blended}"
                );
            }
        }
    }

    #[test]
    fn test_derive_overall_rounds_mean() {
        assert_eq!(derive_overall(4, 4, 5), 4);
        assert_eq!(derive_overall(4, 5, 5), 5);
        assert_eq!(derive_overall(1, 1, 2), 1);
    }
}
