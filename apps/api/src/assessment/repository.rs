use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{AssessmentRow, GeminiResponse};

/// Stores the scored result. Names and personality codes are never persisted.
pub async fn save_assessment(
    pool: &PgPool,
    response: &GeminiResponse,
) -> Result<AssessmentRow, sqlx::Error> {
    let row = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments
            (id, friend_score, coworker_score, partner_score, overall_score,
             friend_explanation, coworker_explanation, partner_explanation)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(i32::from(response.friend_score))
    .bind(i32::from(response.coworker_score))
    .bind(i32::from(response.partner_score))
    .bind(i32::from(response.overall_score))
    .bind(Json(&response.friend_explanation))
    .bind(Json(&response.coworker_explanation))
    .bind(Json(&response.partner_explanation))
    .fetch_one(pool)
    .await?;

    info!("Saved assessment {}", row.id);
    Ok(row)
}

pub async fn get_assessment(pool: &PgPool, id: Uuid) -> Result<Option<AssessmentRow>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentRow>("SELECT * FROM assessments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All stored assessments, newest first.
pub async fn list_assessments(pool: &PgPool) -> Result<Vec<AssessmentRow>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentRow>("SELECT * FROM assessments ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}
