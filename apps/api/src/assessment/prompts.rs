// Prompt templates for compatibility assessment.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, SCORING_GUIDELINES, STRUCTURE_INSTRUCTION};
use crate::models::{Category, ExplanationDocument, PersonData};

/// Explanation shape shown to the model, shared by both response formats.
const EXPLANATION_SHAPE: &str = r#"{
    "sections": [
      {
        "heading": "<Section heading>",
        "subcategories": [
          {
            "title": "<Sub-category title>",
            "bullets": [
              {"text": "<detailed bullet>"}
            ]
          }
        ]
      }
    ]
  }"#;

/// Full assessment prompt.
/// Replace: {people}, {structure}, {explanation}, {scoring}, {json_only}
const ASSESSMENT_PROMPT_TEMPLATE: &str = r#"You are a compatibility assessment expert. Analyze the compatibility between two people based on ALL the information provided below. You MUST consider and reference their names and MBTI types when making your assessment.

{people}

Drawing from MBTI, cognitive functions, and relationship psychology, assess the pair in three contexts: friendship, workplace, and romance.

For each context: {structure}

Use a mix of consistent labels (like "Strengths", "Challenges") and context-specific labels (like "What Draws Them Together" for romance, "Communication Styles" for friendship, "Collaboration Tips" for workplace).

Return a JSON object with this EXACT structure:
{
  "friend_score": <integer 1-5>,
  "coworker_score": <integer 1-5>,
  "partner_score": <integer 1-5>,
  "overall_score": <integer 1-5>,
  "friend_explanation": {explanation},
  "coworker_explanation": {explanation},
  "partner_explanation": {explanation}
}

{scoring}

{json_only}"#;

/// Single-category prompt.
/// Replace: {relationship}, {base}, {people}, {focus}, {instructions},
///          {structure}, {explanation}, {scoring}, {json_only}
const CATEGORY_PROMPT_TEMPLATE: &str = r#"You are a compatibility assessment expert. Analyze the compatibility between two people {relationship} based on ALL the information provided below. You MUST consider and reference their names and MBTI types when making your assessment.{base}

{people}

{focus}

{instructions}

{structure}

Return a JSON object with this EXACT structure:
{
  "score": <integer 1-5>,
  "explanation": {explanation}
}

{scoring}

{json_only}"#;

const PLAIN_INSTRUCTIONS: &str = "\
CRITICAL INSTRUCTIONS:
- You MUST reference and incorporate MBTI types and names in your analysis
- Focus entirely on the provided MBTI information to deliver the most accurate assessment";

const AUGMENT_INSTRUCTIONS: &str = "\
CRITICAL AUGMENTATION INSTRUCTIONS:
- You have been provided with a base MBTI compatibility assessment above
- ENHANCE it by incorporating the MBTI information provided for each person
- Maintain the structure of the base assessment but expand it with pair-specific detail";

fn people_block(person1: &PersonData, person2: &PersonData) -> String {
    format!(
        "PERSON 1:\n- Name: {}\n- MBTI Type: {}\n\nPERSON 2:\n- Name: {}\n- MBTI Type: {}",
        person1.name, person1.mbti, person2.name, person2.mbti
    )
}

fn category_focus(category: Category) -> &'static str {
    match category {
        Category::Friend => "\
Focus specifically on how these two people would interact as FRIENDS. Consider:
- Communication styles and preferences
- Shared interests and activities
- Emotional support and understanding
- Potential conflicts and how they might resolve them
- Complementary personality traits and friendship challenges",
        Category::Coworker => "\
Focus specifically on how these two people would interact as COWORKERS. Consider:
- Work styles and approaches to tasks
- Communication in professional settings
- Collaboration and teamwork potential
- Problem-solving approaches and complementary skills
- Potential workplace conflicts and how they might handle them",
        Category::Partner => "\
Focus specifically on how these two people would interact as ROMANTIC PARTNERS. Consider:
- Romantic chemistry and emotional connection
- Communication needs and styles in relationships
- Shared values and life goals
- Conflict resolution in romantic relationships
- Long-term relationship potential",
    }
}

fn base_block(base: &ExplanationDocument) -> String {
    let json = serde_json::to_string_pretty(base).unwrap_or_default();
    if json.is_empty() {
        return String::new();
    }
    format!(
        "\n\nIMPORTANT: Below is the BASE compatibility assessment for these MBTI types \
         (based on MBTI compatibility alone):\n\n{json}\n\n\
         Use it as a foundation and ENHANCE it with insights specific to this pairing."
    )
}

/// Prompt for the three-category assessment.
pub fn build_assessment_prompt(person1: &PersonData, person2: &PersonData) -> String {
    ASSESSMENT_PROMPT_TEMPLATE
        .replace("{people}", &people_block(person1, person2))
        .replace("{structure}", STRUCTURE_INSTRUCTION)
        .replace("{explanation}", EXPLANATION_SHAPE)
        .replace("{scoring}", SCORING_GUIDELINES)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

/// Prompt for one category, optionally asking the model to augment an
/// existing explanation.
pub fn build_category_prompt(
    person1: &PersonData,
    person2: &PersonData,
    category: Category,
    base_explanation: Option<&ExplanationDocument>,
) -> String {
    let (base, instructions) = match base_explanation {
        Some(base) => (base_block(base), AUGMENT_INSTRUCTIONS),
        None => (String::new(), PLAIN_INSTRUCTIONS),
    };

    CATEGORY_PROMPT_TEMPLATE
        .replace("{relationship}", category.relationship_phrase())
        .replace("{base}", &base)
        .replace("{people}", &people_block(person1, person2))
        .replace("{focus}", category_focus(category))
        .replace("{instructions}", instructions)
        .replace("{structure}", STRUCTURE_INSTRUCTION)
        .replace("{explanation}", EXPLANATION_SHAPE)
        .replace("{scoring}", SCORING_GUIDELINES)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}
