use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::category::Category;
use crate::models::explanation::ExplanationDocument;

/// One side of an assessment. The name only ever reaches the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mbti: String,
}

impl PersonData {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.mbti.trim().is_empty()
    }
}

/// Final three-category result: blended scores plus explanation documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiResponse {
    pub friend_score: u8,
    pub coworker_score: u8,
    pub partner_score: u8,
    pub overall_score: u8,
    pub friend_explanation: ExplanationDocument,
    pub coworker_explanation: ExplanationDocument,
    pub partner_explanation: ExplanationDocument,
}

impl GeminiResponse {
    pub fn score(&self, category: Category) -> u8 {
        match category {
            Category::Friend => self.friend_score,
            Category::Coworker => self.coworker_score,
            Category::Partner => self.partner_score,
        }
    }

    pub fn explanation(&self, category: Category) -> &ExplanationDocument {
        match category {
            Category::Friend => &self.friend_explanation,
            Category::Coworker => &self.coworker_explanation,
            Category::Partner => &self.partner_explanation,
        }
    }
}

/// Single-category result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub score: u8,
    pub explanation: ExplanationDocument,
}

/// Stored assessment. Holds results only: no names, no personality codes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: Uuid,
    pub friend_score: i32,
    pub coworker_score: i32,
    pub partner_score: i32,
    pub overall_score: i32,
    pub friend_explanation: Json<ExplanationDocument>,
    pub coworker_explanation: Json<ExplanationDocument>,
    pub partner_explanation: Json<ExplanationDocument>,
    pub created_at: DateTime<Utc>,
}
