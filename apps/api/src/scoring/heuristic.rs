//! Heuristic scorer: a category score derived purely from two personality codes.
//!
//! Algorithm:
//! 1. Start from the neutral baseline 3.0.
//! 2. For each axis, add the category's adjustment for the pair of letters
//!    (both on the first pole, both on the second pole, or differing).
//! 3. Add bounded noise in [-0.3, +0.3] drawn from an injected `NoiseSource`.
//! 4. Round half away from zero and clamp into [1, 5].
//!
//! If either code is invalid, steps 1, 3 and 4 still run: the result is a
//! neutral-centred score rather than an error.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Category;
use crate::scoring::blend::clamp_score;
use crate::scoring::personality::{Axis, PersonalityCode};

pub const NEUTRAL_BASELINE: f64 = 3.0;
pub const NOISE_AMPLITUDE: f64 = 0.3;

// ────────────────────────────────────────────────────────────────────────────
// Randomness capability
// ────────────────────────────────────────────────────────────────────────────

/// Source of the bounded perturbation added to every heuristic score.
///
/// `offset` distinguishes draws made within the same call (one per category).
/// Implementations must return a value in `[-NOISE_AMPLITUDE, NOISE_AMPLITUDE]`.
pub trait NoiseSource: Send + Sync {
    fn sample(&self, offset: u64) -> f64;
}

/// Production source: seeds a fresh generator from wall-clock nanoseconds on
/// every call, so identical inputs do not always score identically.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockNoise;

impl NoiseSource for ClockNoise {
    fn sample(&self, offset: u64) -> f64 {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        SeededNoise(nanos).sample(offset)
    }
}

/// Reproducible source: the same seed and offset always yield the same draw.
#[derive(Debug, Clone, Copy)]
pub struct SeededNoise(pub u64);

impl NoiseSource for SeededNoise {
    fn sample(&self, offset: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(self.0.wrapping_add(offset));
        rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE)
    }
}

/// Constant source, clamped into the noise band.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

#[cfg(test)]
impl NoiseSource for FixedNoise {
    fn sample(&self, _offset: u64) -> f64 {
        self.0.clamp(-NOISE_AMPLITUDE, NOISE_AMPLITUDE)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Adjustment tables
// ────────────────────────────────────────────────────────────────────────────

/// Contribution of one axis for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRule {
    /// Both codes carry the axis' first letter (E, N, T, J).
    pub both_first: f64,
    /// Both codes carry the axis' second letter (I, S, F, P).
    pub both_second: f64,
    pub differ: f64,
}

impl AxisRule {
    const fn new(both_first: f64, both_second: f64, differ: f64) -> Self {
        Self {
            both_first,
            both_second,
            differ,
        }
    }

    const fn symmetric(matched: f64, differ: f64) -> Self {
        Self::new(matched, matched, differ)
    }

    fn adjustment(&self, axis: Axis, a: char, b: char) -> f64 {
        if a != b {
            self.differ
        } else if a == axis.letters()[0] {
            self.both_first
        } else {
            self.both_second
        }
    }
}

/// Rules in axis order: Energy, Cognition, Decision, Lifestyle.
pub type AxisTable = [AxisRule; 4];

const FRIEND_TABLE: AxisTable = [
    AxisRule::symmetric(0.4, -0.2),
    AxisRule::new(0.3, 0.2, -0.1),
    AxisRule::new(0.2, 0.4, 0.1),
    AxisRule::symmetric(0.2, 0.1),
];

const COWORKER_TABLE: AxisTable = [
    AxisRule::symmetric(0.1, 0.2),
    AxisRule::symmetric(0.1, 0.2),
    AxisRule::new(0.4, 0.2, 0.2),
    AxisRule::new(0.4, 0.1, 0.1),
];

// Opposite energy is favoured for romantic pairings.
const PARTNER_TABLE: AxisTable = [
    AxisRule::symmetric(-0.1, 0.4),
    AxisRule::new(0.3, 0.2, 0.1),
    AxisRule::new(0.1, 0.5, 0.2),
    AxisRule::symmetric(0.1, 0.2),
];

pub fn axis_table(category: Category) -> &'static AxisTable {
    match category {
        Category::Friend => &FRIEND_TABLE,
        Category::Coworker => &COWORKER_TABLE,
        Category::Partner => &PARTNER_TABLE,
    }
}

/// Sum of the per-axis adjustments, before baseline and noise.
pub fn trait_adjustment(
    category: Category,
    first: &PersonalityCode,
    second: &PersonalityCode,
) -> f64 {
    let table = axis_table(category);
    Axis::ALL
        .iter()
        .zip(table.iter())
        .map(|(&axis, rule)| rule.adjustment(axis, first.letter(axis), second.letter(axis)))
        .sum()
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Heuristic scores for all three categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicScoreSet {
    pub friend: u8,
    pub coworker: u8,
    pub partner: u8,
}

impl HeuristicScoreSet {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Friend => self.friend,
            Category::Coworker => self.coworker,
            Category::Partner => self.partner,
        }
    }
}

/// Scores one category. Invalid codes fall back to the neutral baseline.
pub fn heuristic_score(
    first_code: &str,
    second_code: &str,
    category: Category,
    noise: &dyn NoiseSource,
) -> u8 {
    let noise_value = noise.sample(category.seed_offset());

    match (
        PersonalityCode::parse(first_code),
        PersonalityCode::parse(second_code),
    ) {
        (Ok(first), Ok(second)) => {
            let base = NEUTRAL_BASELINE + trait_adjustment(category, &first, &second);
            clamp_score(base + noise_value)
        }
        (first, second) => {
            debug!(
                %category,
                first_valid = first.is_ok(),
                second_valid = second.is_ok(),
                "Invalid personality code, using neutral heuristic baseline"
            );
            clamp_score(NEUTRAL_BASELINE + noise_value)
        }
    }
}

pub fn heuristic_scores(
    first_code: &str,
    second_code: &str,
    noise: &dyn NoiseSource,
) -> HeuristicScoreSet {
    HeuristicScoreSet {
        friend: heuristic_score(first_code, second_code, Category::Friend, noise),
        coworker: heuristic_score(first_code, second_code, Category::Coworker, noise),
        partner: heuristic_score(first_code, second_code, Category::Partner, noise),
    }
}
