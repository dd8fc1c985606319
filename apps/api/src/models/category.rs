use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three relationship contexts an assessment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Friend,
    Coworker,
    Partner,
}

/// Subcategory titles used for sections past the third.
const DEFAULT_SUBCATEGORY_TITLES: &[&str] = &["Strengths", "Challenges", "Growth Opportunities"];

const FRIEND_SUBCATEGORIES: [&[&str]; 3] = [
    &[
        "Communication Styles",
        "Potential Misunderstandings",
        "Tips for Better Communication",
    ],
    &["What Makes Them Great Together", "Complementary Strengths"],
    &["Growth Opportunities", "Challenges to Navigate"],
];

const COWORKER_SUBCATEGORIES: [&[&str]; 3] = [
    &[
        "Complementary Skills",
        "Potential Friction Points",
        "Collaboration Tips",
    ],
    &["Team Dynamics", "Problem-Solving Approaches"],
    &["Professional Growth", "Considerations"],
];

const PARTNER_SUBCATEGORIES: [&[&str]; 3] = [
    &[
        "What Draws Them Together",
        "Communication Needs",
        "Success Strategies",
    ],
    &["Relationship Strengths", "Values Alignment"],
    &["Long-term Potential", "Growth Together"],
];

impl Category {
    pub const ALL: [Category; 3] = [Category::Friend, Category::Coworker, Category::Partner];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Friend => "friend",
            Category::Coworker => "coworker",
            Category::Partner => "partner",
        }
    }

    /// Phrase completing "compatibility between two people ...".
    pub fn relationship_phrase(self) -> &'static str {
        match self {
            Category::Friend => "as friends",
            Category::Coworker => "as coworkers",
            Category::Partner => "as partners in a romantic relationship",
        }
    }

    /// Section headings used when a document is synthesized or padded.
    pub fn headings(self) -> &'static [&'static str; 3] {
        match self {
            Category::Friend => &[
                "Cognitive Compatibility & Communication",
                "Strengths & Synergies",
                "Growth Opportunities & Challenges",
            ],
            Category::Coworker => &[
                "Work Style Compatibility",
                "Collaboration Potential",
                "Professional Development & Considerations",
            ],
            Category::Partner => &[
                "Romantic Chemistry & Emotional Connection",
                "Relationship Strengths & Values Alignment",
                "Long-term Potential & Growth Together",
            ],
        }
    }

    /// Subcategory titles for the section at `section_index`.
    pub fn subcategory_titles(self, section_index: usize) -> &'static [&'static str] {
        let table = match self {
            Category::Friend => &FRIEND_SUBCATEGORIES,
            Category::Coworker => &COWORKER_SUBCATEGORIES,
            Category::Partner => &PARTNER_SUBCATEGORIES,
        };
        table
            .get(section_index)
            .copied()
            .unwrap_or(DEFAULT_SUBCATEGORY_TITLES)
    }

    /// Offset mixed into the noise seed so the three categories scored in one
    /// request do not draw identical perturbations.
    pub fn seed_offset(self) -> u64 {
        match self {
            Category::Friend => 1,
            Category::Coworker => 2,
            Category::Partner => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}' (expected friend, coworker or partner)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "friend" | "friendship" => Ok(Category::Friend),
            "coworker" | "workplace" => Ok(Category::Coworker),
            "partner" | "romance" => Ok(Category::Partner),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
