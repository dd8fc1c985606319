//! Schema cascade: decodes a sanitized response against every response
//! shape the generative service has produced over time, newest first.
//!
//! Versions, in the order they are tried:
//! 1. Current: explanations are full section → subcategory → bullet documents.
//! 2. Intermediate: explanations are `{"sections": [{"heading", "content"}]}`;
//!    each section's content string is structured into subcategories.
//! 3. Legacy: explanations are a single narrative string.
//!
//! The first version that decodes wins. When none does, every version's
//! decode error is kept so the caller can see why each one was rejected.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::models::{Category, ExplanationDocument};
use crate::normalize::structurer::{complete_document, structure_narrative, structure_sections};
use crate::normalize::NormalizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    Current,
    Intermediate,
    Legacy,
}

pub const SCHEMA_ORDER: [SchemaVersion; 3] = [
    SchemaVersion::Current,
    SchemaVersion::Intermediate,
    SchemaVersion::Legacy,
];

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchemaVersion::Current => "current",
            SchemaVersion::Intermediate => "intermediate",
            SchemaVersion::Legacy => "legacy",
        })
    }
}

/// Why one schema version rejected the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFailure {
    pub version: SchemaVersion,
    pub message: String,
}

impl fmt::Display for SchemaFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} schema: {}", self.version, self.message)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Explanation shapes
// ────────────────────────────────────────────────────────────────────────────

/// One historical shape of a category explanation, convertible into the
/// structured document.
trait ExplanationShape: DeserializeOwned {
    fn into_document(self, category: Category) -> ExplanationDocument;
}

impl ExplanationShape for ExplanationDocument {
    fn into_document(self, category: Category) -> ExplanationDocument {
        complete_document(self, category)
    }
}

#[derive(Debug, Deserialize)]
struct SectionedExplanation {
    sections: Vec<ContentSection>,
}

#[derive(Debug, Deserialize)]
struct ContentSection {
    #[serde(default)]
    heading: String,
    content: String,
}

impl ExplanationShape for SectionedExplanation {
    fn into_document(self, category: Category) -> ExplanationDocument {
        structure_sections(
            self.sections
                .iter()
                .map(|s| (s.heading.as_str(), s.content.as_str())),
            category,
        )
    }
}

impl ExplanationShape for String {
    fn into_document(self, category: Category) -> ExplanationDocument {
        structure_narrative(&self, category)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Envelopes
// ────────────────────────────────────────────────────────────────────────────

/// Missing or `null` scores decode as 0, which score validation later treats
/// as out of range.
fn lenient_score<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct FullEnvelope<E> {
    #[serde(default, deserialize_with = "lenient_score")]
    friend_score: i64,
    #[serde(default, deserialize_with = "lenient_score")]
    coworker_score: i64,
    #[serde(default, deserialize_with = "lenient_score")]
    partner_score: i64,
    #[serde(default, deserialize_with = "lenient_score")]
    overall_score: i64,
    friend_explanation: E,
    coworker_explanation: E,
    partner_explanation: E,
}

#[derive(Debug, Deserialize)]
struct SingleEnvelope<E> {
    #[serde(default, deserialize_with = "lenient_score")]
    score: i64,
    explanation: E,
}

/// A three-category response as the model reported it, before any score
/// validation or blending.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAssessment {
    pub version: SchemaVersion,
    pub friend_score: i64,
    pub coworker_score: i64,
    pub partner_score: i64,
    pub overall_score: i64,
    pub friend_explanation: ExplanationDocument,
    pub coworker_explanation: ExplanationDocument,
    pub partner_explanation: ExplanationDocument,
}

impl ModelAssessment {
    pub fn score(&self, category: Category) -> i64 {
        match category {
            Category::Friend => self.friend_score,
            Category::Coworker => self.coworker_score,
            Category::Partner => self.partner_score,
        }
    }
}

/// A single-category response as the model reported it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCategory {
    pub version: SchemaVersion,
    pub score: i64,
    pub explanation: ExplanationDocument,
}

fn decode_full<E: ExplanationShape>(
    text: &str,
    version: SchemaVersion,
) -> Result<ModelAssessment, serde_json::Error> {
    let envelope: FullEnvelope<E> = serde_json::from_str(text)?;
    Ok(ModelAssessment {
        version,
        friend_score: envelope.friend_score,
        coworker_score: envelope.coworker_score,
        partner_score: envelope.partner_score,
        overall_score: envelope.overall_score,
        friend_explanation: envelope.friend_explanation.into_document(Category::Friend),
        coworker_explanation: envelope.coworker_explanation.into_document(Category::Coworker),
        partner_explanation: envelope.partner_explanation.into_document(Category::Partner),
    })
}

fn decode_single<E: ExplanationShape>(
    text: &str,
    version: SchemaVersion,
    category: Category,
) -> Result<ModelCategory, serde_json::Error> {
    let envelope: SingleEnvelope<E> = serde_json::from_str(text)?;
    Ok(ModelCategory {
        version,
        score: envelope.score,
        explanation: envelope.explanation.into_document(category),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Cascade
// ────────────────────────────────────────────────────────────────────────────

fn run_cascade<T, F>(text: &str, decode: F) -> Result<T, NormalizeError>
where
    F: Fn(SchemaVersion) -> Result<T, serde_json::Error>,
{
    let mut failures = Vec::with_capacity(SCHEMA_ORDER.len());

    for version in SCHEMA_ORDER {
        match decode(version) {
            Ok(result) => {
                debug!("Response matched {} schema", version);
                return Ok(result);
            }
            Err(e) => failures.push(SchemaFailure {
                version,
                message: e.to_string(),
            }),
        }
    }

    Err(NormalizeError::AllSchemasFailed {
        failures,
        text: text.to_string(),
    })
}

/// Decodes a full three-category response.
pub fn parse_assessment(text: &str) -> Result<ModelAssessment, NormalizeError> {
    run_cascade(text, |version| match version {
        SchemaVersion::Current => decode_full::<ExplanationDocument>(text, version),
        SchemaVersion::Intermediate => decode_full::<SectionedExplanation>(text, version),
        SchemaVersion::Legacy => decode_full::<String>(text, version),
    })
}

/// Decodes a single-category `{score, explanation}` response.
pub fn parse_category(text: &str, category: Category) -> Result<ModelCategory, NormalizeError> {
    run_cascade(text, |version| match version {
        SchemaVersion::Current => decode_single::<ExplanationDocument>(text, version, category),
        SchemaVersion::Intermediate => {
            decode_single::<SectionedExplanation>(text, version, category)
        }
        SchemaVersion::Legacy => decode_single::<String>(text, version, category),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BulletPoint, Section, Subcategory};

    fn document(tag: &str) -> ExplanationDocument {
        let section = |n: usize| Section {
            heading: format!("{tag} heading {n}"),
            subcategories: vec![Subcategory {
                title: format!("{tag} title {n}"),
                bullets: vec![BulletPoint::new(format!("{tag} bullet {n}."))],
            }],
        };
        ExplanationDocument {
            sections: vec![section(1), section(2), section(3)],
        }
    }

    #[test]
    fn test_current_schema_passes_through() {
        let json = serde_json::json!({
            "friend_score": 4,
            "coworker_score": 3,
            "partner_score": 5,
            "overall_score": 4,
            "friend_explanation": document("friend"),
            "coworker_explanation": document("coworker"),
            "partner_explanation": document("partner"),
        })
        .to_string();

        let parsed = parse_assessment(&json).unwrap();
        assert_eq!(parsed.version, SchemaVersion::Current);
        assert_eq!(parsed.friend_explanation, document("friend"));
        assert_eq!(parsed.partner_explanation, document("partner"));
        assert_eq!(parsed.score(Category::Partner), 5);
        assert_eq!(parsed.overall_score, 4);
    }

    #[test]
    fn test_current_schema_short_document_is_padded() {
        let json = r#"{
            "score": 4,
            "explanation": {"sections": [
                {"heading": "Only", "subcategories": [{"title": "T", "bullets": [{"text": "One."}]}]}
            ]}
        }"#;
        let parsed = parse_category(json, Category::Coworker).unwrap();
        assert_eq!(parsed.version, SchemaVersion::Current);
        assert_eq!(parsed.explanation.sections.len(), 3);
        assert_eq!(parsed.explanation.sections[0].heading, "Only");
        assert!(parsed.explanation.is_complete());
    }

    #[test]
    fn test_intermediate_schema_keeps_section_headings() {
        let json = r#"{
            "friend_score": 4, "coworker_score": 4, "partner_score": 2, "overall_score": 3,
            "friend_explanation": {"sections": [
                {"heading": "Talk", "content": "They chat for hours. They rarely argue."},
                {"heading": "Fun", "content": "Shared hobbies."},
                {"heading": "Friction", "content": "Different schedules."}
            ]},
            "coworker_explanation": {"sections": [{"heading": "Work", "content": "Efficient."}]},
            "partner_explanation": {"sections": []}
        }"#;

        let parsed = parse_assessment(json).unwrap();
        assert_eq!(parsed.version, SchemaVersion::Intermediate);

        let friend = &parsed.friend_explanation;
        assert_eq!(friend.sections[0].heading, "Talk");
        assert_eq!(friend.sections[0].subcategories[0].title, "Communication Styles");
        assert_eq!(friend.sections[0].subcategories[0].bullets.len(), 2);
        assert_eq!(friend.sections[2].heading, "Friction");

        assert_eq!(parsed.coworker_explanation.sections.len(), 3);
        assert_eq!(parsed.coworker_explanation.sections[1].heading, "Collaboration Potential");
        assert!(parsed.partner_explanation.is_complete());
    }

    #[test]
    fn test_legacy_schema_structures_narrative() {
        let json = r#"{"score": 9, "explanation": "Great match."}"#;
        let parsed = parse_category(json, Category::Friend).unwrap();
        assert_eq!(parsed.version, SchemaVersion::Legacy);
        assert_eq!(parsed.score, 9);
        assert_eq!(parsed.explanation.sections.len(), 3);
        assert_eq!(
            parsed.explanation.sections[0].subcategories[0].bullets[0].text,
            "Great match."
        );
    }

    #[test]
    fn test_legacy_full_response() {
        let json = r#"{
            "friend_score": 5, "coworker_score": 2, "partner_score": 3, "overall_score": 3,
            "friend_explanation": "Easy rapport.\n\nLots of laughter.",
            "coworker_explanation": "Different paces.",
            "partner_explanation": "Warm but cautious."
        }"#;
        let parsed = parse_assessment(json).unwrap();
        assert_eq!(parsed.version, SchemaVersion::Legacy);
        assert_eq!(
            parsed.friend_explanation.sections[1].subcategories[0].bullets[0].text,
            "Lots of laughter."
        );
        assert_eq!(
            parsed.coworker_explanation.sections[0].heading,
            "Work Style Compatibility"
        );
    }

    #[test]
    fn test_missing_scores_decode_as_zero() {
        let json = r#"{"explanation": "Fine."}"#;
        let parsed = parse_category(json, Category::Partner).unwrap();
        assert_eq!(parsed.score, 0);
    }

    #[test]
    fn test_null_score_decodes_as_zero() {
        let json = r#"{"score": null, "explanation": "Fine."}"#;
        let parsed = parse_category(json, Category::Friend).unwrap();
        assert_eq!(parsed.version, SchemaVersion::Legacy);
        assert_eq!(parsed.score, 0);
    }

    #[test]
    fn test_null_scores_in_full_response_decode_as_zero() {
        let json = r#"{
            "friend_score": null, "coworker_score": 3, "partner_score": null, "overall_score": null,
            "friend_explanation": "Easy rapport.",
            "coworker_explanation": "Different paces.",
            "partner_explanation": "Warm but cautious."
        }"#;
        let parsed = parse_assessment(json).unwrap();
        assert_eq!(parsed.score(Category::Friend), 0);
        assert_eq!(parsed.score(Category::Coworker), 3);
        assert_eq!(parsed.score(Category::Partner), 0);
        assert_eq!(parsed.overall_score, 0);
    }

    #[test]
    fn test_non_numeric_score_is_still_rejected() {
        let err = parse_category(r#"{"score": "high", "explanation": "Fine."}"#, Category::Friend);
        assert!(err.is_err());
    }

    #[test]
    fn test_all_failures_are_reported() {
        let err = parse_category("not json at all", Category::Friend).unwrap_err();
        let NormalizeError::AllSchemasFailed { failures, .. } = &err;
        let versions: Vec<SchemaVersion> = failures.iter().map(|f| f.version).collect();
        assert_eq!(versions, SCHEMA_ORDER.to_vec());

        let message = err.to_string();
        for name in ["current", "intermediate", "legacy"] {
            assert!(message.contains(name), "missing {name} in: {message}");
        }
    }

    #[test]
    fn test_explanation_of_wrong_type_fails_every_version() {
        let err = parse_category(r#"{"score": 3, "explanation": 42}"#, Category::Friend);
        assert!(err.is_err());
    }
}
