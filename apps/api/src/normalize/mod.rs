//! Response normalization: turns raw generative-service text into scored,
//! fully structured results.
//!
//! Pipeline:
//! 1. `extract`   isolate the first `{ ... }` object in the raw text
//! 2. `sanitize`  repair trailing commas outside string literals
//! 3. `schema`    decode against current → intermediate → legacy shapes,
//!              synthesizing structure from narrative text when needed
//! 4. scoring     validate model scores, blend with heuristic scores
//!
//! Everything here is pure and synchronous.

pub mod extract;
pub mod sanitize;
pub mod schema;
pub mod structurer;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Category, CategoryResponse, GeminiResponse, PersonData};
use crate::scoring::blend::{
    blend_scores, derive_overall, in_range, validate_model_score, validate_overall_score,
};
use crate::scoring::{heuristic_score, heuristic_scores, NoiseSource};

use schema::SchemaFailure;

const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error(
        "Response matched no known schema ({}). Response began: {}",
        join_failures(.failures),
        preview(.text)
    )]
    AllSchemasFailed {
        failures: Vec<SchemaFailure>,
        text: String,
    },
}

fn join_failures(failures: &[SchemaFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Extract then sanitize.
pub fn prepare(raw: &str) -> String {
    sanitize::sanitize(extract::extract_json_object(raw))
}

fn corrected_score(category: Category, raw: i64) -> u8 {
    let score = validate_model_score(raw);
    if !in_range(raw) {
        warn!(
            "Model reported out-of-range {} score {}, using {}",
            category, raw, score
        );
    }
    score
}

/// Full three-category normalization.
pub fn normalize_assessment(
    raw: &str,
    person1: &PersonData,
    person2: &PersonData,
    noise: &dyn NoiseSource,
) -> Result<GeminiResponse, NormalizeError> {
    let parsed = schema::parse_assessment(&prepare(raw))?;

    let friend = corrected_score(Category::Friend, parsed.score(Category::Friend));
    let coworker = corrected_score(Category::Coworker, parsed.score(Category::Coworker));
    let partner = corrected_score(Category::Partner, parsed.score(Category::Partner));
    let model_overall = validate_overall_score(parsed.overall_score, friend, coworker, partner);
    if !in_range(parsed.overall_score) {
        warn!(
            "Model reported out-of-range overall score {}, recomputed as {}",
            parsed.overall_score, model_overall
        );
    }

    let heuristic = heuristic_scores(&person1.mbti, &person2.mbti, noise);
    let friend_score = blend_scores(friend, heuristic.get(Category::Friend));
    let coworker_score = blend_scores(coworker, heuristic.get(Category::Coworker));
    let partner_score = blend_scores(partner, heuristic.get(Category::Partner));

    debug!(
        "Blended {} schema scores: model=({}, {}, {}, overall {}), heuristic=({}, {}, {})",
        parsed.version,
        friend,
        coworker,
        partner,
        model_overall,
        heuristic.friend,
        heuristic.coworker,
        heuristic.partner
    );

    Ok(GeminiResponse {
        friend_score,
        coworker_score,
        partner_score,
        overall_score: derive_overall(friend_score, coworker_score, partner_score),
        friend_explanation: parsed.friend_explanation,
        coworker_explanation: parsed.coworker_explanation,
        partner_explanation: parsed.partner_explanation,
    })
}

/// Single-category normalization.
pub fn normalize_category(
    raw: &str,
    person1: &PersonData,
    person2: &PersonData,
    category: Category,
    noise: &dyn NoiseSource,
) -> Result<CategoryResponse, NormalizeError> {
    let parsed = schema::parse_category(&prepare(raw), category)?;

    let model = corrected_score(category, parsed.score);
    let heuristic = heuristic_score(&person1.mbti, &person2.mbti, category, noise);
    debug!(
        "Blended {} schema {} score: model={}, heuristic={}",
        parsed.version, category, model, heuristic
    );

    Ok(CategoryResponse {
        score: blend_scores(model, heuristic),
        explanation: parsed.explanation,
    })
}
