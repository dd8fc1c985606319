//! Axum route handlers for the Assessment API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::assessment::repository::{get_assessment, list_assessments, save_assessment};
use crate::assessment::service::{assess_category, assess_compatibility};
use crate::errors::AppError;
use crate::models::{AssessmentRow, Category, CategoryResponse, ExplanationDocument, PersonData};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub person1: PersonData,
    pub person2: PersonData,
}

#[derive(Debug, Deserialize)]
pub struct CategoryAssessRequest {
    pub person1: PersonData,
    pub person2: PersonData,
    #[serde(default)]
    pub base_explanation: Option<ExplanationDocument>,
}

fn validate_people(person1: &PersonData, person2: &PersonData) -> Result<(), AppError> {
    if !person1.is_complete() {
        return Err(AppError::Validation(
            "Person 1 must have a name and MBTI type".to_string(),
        ));
    }
    if !person2.is_complete() {
        return Err(AppError::Validation(
            "Person 2 must have a name and MBTI type".to_string(),
        ));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/assess
///
/// Full three-category assessment. The scored result is persisted; the
/// people's names and codes are not.
pub async fn handle_assess(
    State(state): State<AppState>,
    Json(request): Json<AssessRequest>,
) -> Result<Json<AssessmentRow>, AppError> {
    validate_people(&request.person1, &request.person2)?;

    let response = assess_compatibility(
        state.llm.as_ref(),
        state.noise.as_ref(),
        &request.person1,
        &request.person2,
    )
    .await?;

    let row = save_assessment(&state.db, &response).await?;
    Ok(Json(row))
}

/// POST /api/assess/:category
///
/// Single-category assessment, optionally augmenting a base explanation.
/// Not persisted.
pub async fn handle_assess_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(request): Json<CategoryAssessRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = category
        .parse::<Category>()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    validate_people(&request.person1, &request.person2)?;

    let response = assess_category(
        state.llm.as_ref(),
        state.noise.as_ref(),
        &request.person1,
        &request.person2,
        category,
        request.base_explanation.as_ref(),
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/assessment/:id
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentRow>, AppError> {
    get_assessment(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Assessment {id} not found")))
}

/// GET /api/assessments
///
/// Every stored assessment, newest first.
pub async fn handle_list_assessments(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    Ok(Json(list_assessments(&state.db).await?))
}
