use serde::{Deserialize, Serialize};

/// One trimmed sentence, or a short run of sentences merged into one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletPoint {
    pub text: String,
}

impl BulletPoint {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    #[serde(default)]
    pub title: String,
    pub bullets: Vec<BulletPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub heading: String,
    pub subcategories: Vec<Subcategory>,
}

/// The structured explanation attached to each category score.
///
/// Also the newest response shape the generative service is asked for, so
/// `bullets`, `subcategories` and `sections` are required when decoding: a
/// section carrying a flat `content` string must not decode as this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationDocument {
    pub sections: Vec<Section>,
}

impl ExplanationDocument {
    /// At least 3 sections, each with a subcategory, each with a non-empty bullet.
    pub fn is_complete(&self) -> bool {
        self.sections.len() >= 3
            && self.sections.iter().all(|section| {
                !section.subcategories.is_empty()
                    && section.subcategories.iter().all(|sub| {
                        !sub.bullets.is_empty()
                            && sub.bullets.iter().all(|b| !b.text.trim().is_empty())
                    })
            })
    }

    pub fn bullet_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.subcategories)
            .map(|sub| sub.bullets.len())
            .sum()
    }
}
