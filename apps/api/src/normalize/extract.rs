/// Returns the first brace-balanced `{ ... }` span in `text`, or `text`
/// unchanged when no balanced object is found (it may already be bare JSON,
/// or it is not JSON at all and the schema cascade will report that).
///
/// Handles prose before/after the object and markdown code fences, since
/// the fence markers sit outside the braces.
///
/// Known limitation: the depth counter does not track string literals, so a
/// `{` or `}` inside a quoted value shifts the span boundary. The cascade then
/// sees a truncated (or extended) object and usually fails to parse it.
/// Closers seen before the first opener are skipped instead of counted, so
/// prose such as `oops } {...}` still yields the object. A plain running
/// depth count would go negative there and fall back to the whole text.
pub fn extract_json_object(text: &str) -> &str {
    let mut start: Option<usize> = None;
    let mut depth: usize = 0;

    for (i, ch) in text.char_indices() {
        match ch {
            '{' => {
                if start.is_none() {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    continue;
                }
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start {
                        return &text[s..=i];
                    }
                }
            }
            _ => {}
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_object_from_prose() {
        let raw = "Here you go:\n{\"score\": 9, \"explanation\": \"Great match.\"}\nEnjoy!";
        assert_eq!(
            extract_json_object(raw),
            "{\"score\": 9, \"explanation\": \"Great match.\"}"
        );
    }

    #[test]
    fn test_extracts_object_from_code_fence() {
        let raw = "```json\n{\"a\": {\"b\": 1}}\n```";
        assert_eq!(extract_json_object(raw), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_stops_at_first_balanced_object() {
        let raw = "{\"first\": 1} and then {\"second\": 2}";
        assert_eq!(extract_json_object(raw), "{\"first\": 1}");
    }

    #[test]
    fn test_returns_input_without_braces() {
        let raw = "no json here";
        assert_eq!(extract_json_object(raw), raw);
    }

    #[test]
    fn test_returns_input_when_unbalanced() {
        let raw = "{\"score\": 4, \"explanation\": {\"sections\": [";
        assert_eq!(extract_json_object(raw), raw);
    }

    #[test]
    fn test_ignores_closer_before_first_opener() {
        let raw = "oops } {\"score\": 2}";
        assert_eq!(extract_json_object(raw), "{\"score\": 2}");
    }

    #[test]
    fn test_multibyte_text_around_object() {
        let raw = "Résumé → {\"note\": \"café\"} ✓";
        assert_eq!(extract_json_object(raw), "{\"note\": \"café\"}");
    }

    #[test]
    fn test_brace_inside_string_cuts_span_short() {
        // Documented limitation: the quoted `}` closes the span early.
        let raw = "{\"text\": \"a } b\", \"score\": 3}";
        assert_eq!(extract_json_object(raw), "{\"text\": \"a }");
    }
}
