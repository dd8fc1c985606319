// Shared prompt fragments.
// Each service that needs generation calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Closing instruction that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY the raw JSON object, nothing else. \
    Do NOT use markdown code fences. \
    Do NOT include any text outside the JSON object.";

/// The 1-5 rubric every score in a response must follow.
pub const SCORING_GUIDELINES: &str = "\
Scoring guidelines:
- 5: Exceptional compatibility with natural synergy and minimal friction
- 4: Strong compatibility with minor areas requiring attention
- 3: Moderate compatibility with some differences that need conscious effort
- 2: Challenging compatibility requiring significant compromise and understanding
- 1: Poor compatibility with fundamental conflicts that are difficult to overcome";

/// Structure every explanation must follow.
pub const STRUCTURE_INSTRUCTION: &str = "\
Provide a structured analysis with AT LEAST 3 distinct sections. Each section should have:
- A clear heading
- 2-3 sub-categories with descriptive titles
- Each sub-category should contain 2-3 bullet points (detailed, not just one word)";
