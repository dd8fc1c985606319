//! Assessment orchestration: prompt → generative service → normalization.
//!
//! Both entry points depend only on the `TextGenerator` and `NoiseSource`
//! capabilities, never on a concrete client.

use tracing::{debug, info};

use crate::assessment::prompts::{build_assessment_prompt, build_category_prompt};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::{Category, CategoryResponse, ExplanationDocument, GeminiResponse, PersonData};
use crate::normalize::{normalize_assessment, normalize_category};
use crate::scoring::NoiseSource;

/// Scores all three categories for a pair.
pub async fn assess_compatibility(
    generator: &dyn TextGenerator,
    noise: &dyn NoiseSource,
    person1: &PersonData,
    person2: &PersonData,
) -> Result<GeminiResponse, AppError> {
    let prompt = build_assessment_prompt(person1, person2);
    let raw = generator.generate(&prompt).await?;
    debug!("Received {} bytes from generative service", raw.len());

    let response = normalize_assessment(&raw, person1, person2, noise)?;

    for category in Category::ALL {
        debug!(
            "{} score={} ({} bullets)",
            category,
            response.score(category),
            response.explanation(category).bullet_count()
        );
    }
    info!("Assessment complete: overall={}", response.overall_score);
    Ok(response)
}

/// Scores one category. With a base explanation, the model is asked to
/// augment it instead of starting from scratch.
pub async fn assess_category(
    generator: &dyn TextGenerator,
    noise: &dyn NoiseSource,
    person1: &PersonData,
    person2: &PersonData,
    category: Category,
    base_explanation: Option<&ExplanationDocument>,
) -> Result<CategoryResponse, AppError> {
    let prompt = build_category_prompt(person1, person2, category, base_explanation);
    let raw = generator.generate(&prompt).await?;
    debug!(
        "Received {} bytes for {} assessment (augmenting: {})",
        raw.len(),
        category,
        base_explanation.is_some()
    );

    let response = normalize_category(&raw, person1, person2, category, noise)?;

    info!(
        "{} assessment complete: score={} ({} bullets)",
        category,
        response.score,
        response.explanation.bullet_count()
    );
    Ok(response)
}
