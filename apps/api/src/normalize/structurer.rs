//! Text structurer: synthesizes sections → subcategories → bullets from
//! narrative text returned under the older response shapes.
//!
//! Paragraph segmentation (first rule that yields ≥ 2 paragraphs wins):
//! 1. blank-line boundaries
//! 2. `.` followed by a newline (the period is re-appended)
//! 3. otherwise the words are split into three equal thirds
//!
//! Paragraph *i* becomes section *i* under the category's heading table.
//! Each paragraph is split into sentences; four or more sentences are spread
//! over the section's subcategory titles, fewer go under its first title.
//! Any subcategory with more than 3 sentences merges them in runs of 3.
//! Missing sections are padded so every document has exactly 3 (narrative)
//! or at least 3 (sectioned) sections.

use tracing::debug;

use crate::models::{BulletPoint, Category, ExplanationDocument, Section, Subcategory};

pub const SECTION_COUNT: usize = 3;
const MIN_SENTENCES_FOR_SPLIT: usize = 4;
const MIN_SENTENCES_PER_SUBCATEGORY: usize = 2;
const MAX_BULLETS_PER_SUBCATEGORY: usize = 3;

pub const PLACEHOLDER_SUBCATEGORY_TITLE: &str = "Additional Insights";
pub const PLACEHOLDER_BULLET: &str = "Continue reading for more detailed analysis.";
pub const FALLBACK_SUBCATEGORY_TITLE: &str = "Compatibility Analysis";

// ────────────────────────────────────────────────────────────────────────────
// Document builders
// ────────────────────────────────────────────────────────────────────────────

/// Builds a 3-section document from a single narrative string.
pub fn structure_narrative(text: &str, category: Category) -> ExplanationDocument {
    let headings = category.headings();
    let paragraphs = fold_into_sections(split_paragraphs(text));
    debug!(
        %category,
        paragraphs = paragraphs.len(),
        "Synthesizing explanation from narrative text"
    );

    let sections = paragraphs
        .iter()
        .enumerate()
        .map(|(i, paragraph)| Section {
            heading: headings[i].to_string(),
            subcategories: paragraph_to_subcategories(paragraph, category, i),
        })
        .collect();

    pad_sections(ExplanationDocument { sections }, category)
}

/// Builds a document from sections that each carry one flat content string,
/// keeping every section's own heading.
pub fn structure_sections<'a, I>(sections: I, category: Category) -> ExplanationDocument
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let sections = sections
        .into_iter()
        .enumerate()
        .map(|(i, (heading, content))| Section {
            heading: heading.to_string(),
            subcategories: paragraph_to_subcategories(content, category, i),
        })
        .collect();

    pad_sections(ExplanationDocument { sections }, category)
}

/// Fills gaps in an already-structured document: blank bullets are dropped,
/// empty subcategories and sections get placeholder content, and missing
/// sections are appended. A complete document is returned unchanged.
pub fn complete_document(document: ExplanationDocument, category: Category) -> ExplanationDocument {
    if document.is_complete() {
        return document;
    }
    debug!(%category, "Padding incomplete structured explanation");

    let sections = document
        .sections
        .into_iter()
        .map(|mut section| {
            for sub in &mut section.subcategories {
                sub.bullets.retain(|b| !b.text.trim().is_empty());
                if sub.bullets.is_empty() {
                    sub.bullets.push(BulletPoint::new(PLACEHOLDER_BULLET));
                }
            }
            if section.subcategories.is_empty() {
                section.subcategories.push(placeholder_subcategory());
            }
            section
        })
        .collect();

    pad_sections(ExplanationDocument { sections }, category)
}

fn pad_sections(mut document: ExplanationDocument, category: Category) -> ExplanationDocument {
    let headings = category.headings();
    while document.sections.len() < SECTION_COUNT {
        let heading = headings[document.sections.len()];
        document.sections.push(Section {
            heading: heading.to_string(),
            subcategories: vec![placeholder_subcategory()],
        });
    }
    document
}

fn placeholder_subcategory() -> Subcategory {
    Subcategory {
        title: PLACEHOLDER_SUBCATEGORY_TITLE.to_string(),
        bullets: vec![BulletPoint::new(PLACEHOLDER_BULLET)],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Segmentation
// ────────────────────────────────────────────────────────────────────────────

fn split_paragraphs(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n");

    let by_blank_line: Vec<String> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    if by_blank_line.len() >= 2 {
        return by_blank_line;
    }

    let by_period_newline: Vec<String> = text
        .split(".\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(with_terminal_punctuation)
        .collect();
    if by_period_newline.len() >= 2 {
        return by_period_newline;
    }

    split_word_thirds(&text)
}

/// Three equal word-count thirds, the last absorbing the remainder. Fewer
/// than three words stay together as one paragraph.
fn split_word_thirds(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    if words.len() < SECTION_COUNT {
        return vec![words.join(" ")];
    }

    let per_section = words.len() / SECTION_COUNT;
    (0..SECTION_COUNT)
        .map(|i| {
            let start = i * per_section;
            let end = if i == SECTION_COUNT - 1 {
                words.len()
            } else {
                start + per_section
            };
            words[start..end].join(" ")
        })
        .collect()
}

/// Paragraphs beyond the third are appended to the third section.
fn fold_into_sections(mut paragraphs: Vec<String>) -> Vec<String> {
    if paragraphs.len() > SECTION_COUNT {
        let overflow = paragraphs.split_off(SECTION_COUNT);
        let last = &mut paragraphs[SECTION_COUNT - 1];
        for paragraph in overflow {
            last.push(' ');
            last.push_str(&paragraph);
        }
    }
    paragraphs
}

/// Splits on `". "`, `"! "` and `"? "`, keeping the punctuation.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') && text[i + 1..].starts_with(' ') {
            push_sentence(&mut sentences, &text[start..=i]);
            start = i + 1;
        }
    }
    push_sentence(&mut sentences, &text[start..]);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        sentences.push(with_terminal_punctuation(fragment));
    }
}

fn with_terminal_punctuation(fragment: &str) -> String {
    if fragment.ends_with(['.', '!', '?']) {
        fragment.to_string()
    } else {
        format!("{fragment}.")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Paragraph → subcategories
// ────────────────────────────────────────────────────────────────────────────

fn paragraph_to_subcategories(
    text: &str,
    category: Category,
    section_index: usize,
) -> Vec<Subcategory> {
    let sentences = split_sentences(text);
    let titles = category.subcategory_titles(section_index);

    let subcategories: Vec<Subcategory> = if sentences.len() >= MIN_SENTENCES_FOR_SPLIT {
        let per_title = (sentences.len() / titles.len()).max(MIN_SENTENCES_PER_SUBCATEGORY);
        titles
            .iter()
            .enumerate()
            .filter_map(|(i, title)| {
                let start = i * per_title;
                if start >= sentences.len() {
                    return None;
                }
                let end = if i == titles.len() - 1 {
                    sentences.len()
                } else {
                    (start + per_title).min(sentences.len())
                };
                Some(Subcategory {
                    title: title.to_string(),
                    bullets: merge_bullets(&sentences[start..end]),
                })
            })
            .collect()
    } else if sentences.is_empty() {
        Vec::new()
    } else {
        vec![Subcategory {
            title: titles[0].to_string(),
            bullets: merge_bullets(&sentences),
        }]
    };

    if subcategories.is_empty() {
        return vec![Subcategory {
            title: FALLBACK_SUBCATEGORY_TITLE.to_string(),
            bullets: vec![BulletPoint::new(PLACEHOLDER_BULLET)],
        }];
    }
    subcategories
}

/// One bullet per sentence, or runs of up to 3 sentences per bullet when
/// there are more than 3.
fn merge_bullets(sentences: &[String]) -> Vec<BulletPoint> {
    if sentences.len() <= MAX_BULLETS_PER_SUBCATEGORY {
        return sentences.iter().map(BulletPoint::new).collect();
    }
    sentences
        .chunks(MAX_BULLETS_PER_SUBCATEGORY)
        .map(|run| BulletPoint::new(run.join(" ")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_PARAGRAPHS: &str = "They share a love of ideas. Conversations run long.\n\n\
        Both value loyalty. They show up for each other.\n\n\
        Planning styles clash. One likes lists and the other improvises.";

    const LONG_PARAGRAPH: &str = "First point here. Second point here. Third point here. \
        Fourth point here. Fifth point here. Sixth point here. Seventh point here.";

    fn titles(section: &Section) -> Vec<&str> {
        section.subcategories.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_blank_line_paragraphs_become_sections() {
        let doc = structure_narrative(THREE_PARAGRAPHS, Category::Friend);
        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.sections[0].heading, "Cognitive Compatibility & Communication");
        assert_eq!(doc.sections[2].heading, "Growth Opportunities & Challenges");
        assert_eq!(
            doc.sections[1].subcategories[0].bullets,
            vec![
                BulletPoint::new("Both value loyalty."),
                BulletPoint::new("They show up for each other.")
            ]
        );
        assert_eq!(titles(&doc.sections[1]), vec!["What Makes Them Great Together"]);
    }

    #[test]
    fn test_period_newline_paragraphs() {
        let text = "They plan well together.\nThey disagree on pace.\nThey grow together";
        let doc = structure_narrative(text, Category::Coworker);
        assert_eq!(doc.sections.len(), 3);
        assert_eq!(
            doc.sections[0].subcategories[0].bullets[0].text,
            "They plan well together."
        );
        assert_eq!(
            doc.sections[2].subcategories[0].bullets[0].text,
            "They grow together."
        );
        assert_eq!(doc.sections[0].subcategories[0].title, "Complementary Skills");
    }

    #[test]
    fn test_single_paragraph_split_into_word_thirds() {
        let text = "one two three four five six seven";
        let doc = structure_narrative(text, Category::Partner);
        let bullets: Vec<&str> = doc
            .sections
            .iter()
            .map(|s| s.subcategories[0].bullets[0].text.as_str())
            .collect();
        assert_eq!(bullets, vec!["one two.", "three four.", "five six seven."]);
    }

    #[test]
    fn test_short_text_padded_to_three_sections() {
        let doc = structure_narrative("Great match.", Category::Friend);
        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.sections[0].subcategories[0].title, "Communication Styles");
        assert_eq!(doc.sections[0].subcategories[0].bullets[0].text, "Great match.");
        assert_eq!(doc.sections[1].heading, "Strengths & Synergies");
        assert_eq!(
            doc.sections[1].subcategories[0].title,
            PLACEHOLDER_SUBCATEGORY_TITLE
        );
        assert_eq!(doc.sections[2].subcategories[0].bullets[0].text, PLACEHOLDER_BULLET);
    }

    #[test]
    fn test_empty_text_yields_three_placeholder_sections() {
        let doc = structure_narrative("   \n\n  ", Category::Coworker);
        assert_eq!(doc.sections.len(), 3);
        assert!(doc.is_complete());
        assert_eq!(doc.sections[2].heading, "Professional Development & Considerations");
    }

    #[test]
    fn test_extra_paragraphs_fold_into_third_section() {
        let text = "One.\n\nTwo.\n\nThree.\n\nFour.";
        let doc = structure_narrative(text, Category::Friend);
        assert_eq!(doc.sections.len(), 3);
        let last: Vec<&str> = doc.sections[2].subcategories[0]
            .bullets
            .iter()
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(last, vec!["Three.", "Four."]);
    }

    #[test]
    fn test_many_sentences_spread_over_subcategory_titles() {
        let subs = paragraph_to_subcategories(LONG_PARAGRAPH, Category::Partner, 0);
        // 7 sentences over 3 titles: 2 per title, the last absorbing the rest
        assert_eq!(
            subs.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(),
            vec![
                "What Draws Them Together",
                "Communication Needs",
                "Success Strategies"
            ]
        );
        assert_eq!(subs[0].bullets.len(), 2);
        assert_eq!(subs[1].bullets.len(), 2);
        assert_eq!(subs[2].bullets.len(), 3);
    }

    #[test]
    fn test_four_sentences_use_two_subcategories() {
        let text = "A one. B two. C three. D four.";
        let subs = paragraph_to_subcategories(text, Category::Friend, 0);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].bullets[0].text, "A one.");
        assert_eq!(subs[1].bullets[1].text, "D four.");
    }

    #[test]
    fn test_large_slice_merges_sentences_in_runs_of_three() {
        let text = (1..=12)
            .map(|i| format!("Sentence {i}."))
            .collect::<Vec<_>>()
            .join(" ");
        // section 1 has two titles: 6 sentences each -> two merged bullets each
        let subs = paragraph_to_subcategories(&text, Category::Friend, 1);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].bullets.len(), 2);
        assert_eq!(
            subs[0].bullets[0].text,
            "Sentence 1. Sentence 2. Sentence 3."
        );
        assert_eq!(
            subs[1].bullets[1].text,
            "Sentence 10. Sentence 11. Sentence 12."
        );
    }

    #[test]
    fn test_sentence_split_keeps_punctuation() {
        let sentences = split_sentences("Wow! Really? Yes. no punctuation");
        assert_eq!(sentences, vec!["Wow!", "Really?", "Yes.", "no punctuation."]);
    }

    #[test]
    fn test_empty_content_gets_fallback_subcategory() {
        let subs = paragraph_to_subcategories("  ", Category::Coworker, 2);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].title, FALLBACK_SUBCATEGORY_TITLE);
        assert!(!subs[0].bullets[0].text.is_empty());
    }

    #[test]
    fn test_structure_sections_keeps_headings_and_pads() {
        let doc = structure_sections(
            [("Shared Values", "They agree on the big things. Small things too.")],
            Category::Partner,
        );
        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.sections[0].heading, "Shared Values");
        assert_eq!(doc.sections[0].subcategories[0].bullets.len(), 2);
        assert_eq!(doc.sections[1].heading, "Relationship Strengths & Values Alignment");
    }

    #[test]
    fn test_structure_sections_keeps_more_than_three() {
        let input = [("A", "One."), ("B", "Two."), ("C", "Three."), ("D", "Four.")];
        let doc = structure_sections(input, Category::Friend);
        assert_eq!(doc.sections.len(), 4);
        assert_eq!(doc.sections[3].subcategories[0].title, "Strengths");
    }

    #[test]
    fn test_complete_document_is_untouched() {
        let doc = structure_narrative(THREE_PARAGRAPHS, Category::Friend);
        assert_eq!(complete_document(doc.clone(), Category::Friend), doc);
    }

    #[test]
    fn test_complete_document_fills_gaps() {
        let doc = ExplanationDocument {
            sections: vec![Section {
                heading: "Only".to_string(),
                subcategories: vec![Subcategory {
                    title: "Empty".to_string(),
                    bullets: vec![BulletPoint::new(" ")],
                }],
            }],
        };
        let fixed = complete_document(doc, Category::Coworker);
        assert!(fixed.is_complete());
        assert_eq!(fixed.sections[0].heading, "Only");
        assert_eq!(fixed.sections[0].subcategories[0].bullets[0].text, PLACEHOLDER_BULLET);
    }

    #[test]
    fn test_non_empty_narratives_always_complete() {
        let samples = [
            "x",
            "Great match.",
            THREE_PARAGRAPHS,
            LONG_PARAGRAPH,
            "a.\nb.\nc.\nd.\ne.",
            "Line one\n\n\n\nLine two",
            "Trailing spaces.   \r\n\r\nWindows paragraph.",
            "? ! .",
        ];
        for category in Category::ALL {
            for text in samples {
                let doc = structure_narrative(text, category);
                assert_eq!(doc.sections.len(), 3, "{category}: {text:?}");
                assert!(doc.is_complete(), "{category}: {text:?} -> {doc:?}");
            }
        }
    }
}
