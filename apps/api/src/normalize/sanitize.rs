//! Trailing-comma repair for model-produced JSON.
//!
//! Two passes, both quote-aware so string content is never touched:
//! 1. direct replacement of the common `,}` / `,]` spellings (with spaces,
//!    LF, CR or CRLF between comma and closer);
//! 2. a scan that drops any remaining comma whose next significant character
//!    closes an object or array.
//!
//! `sanitize(sanitize(x)) == sanitize(x)` for every input.

const TRAILING_COMMA_PATTERNS: &[(&str, &str)] = &[
    (" , }", " }"),
    (" ,}", "}"),
    (",\r\n}", "\r\n}"),
    (",\n}", "\n}"),
    (",\r}", "\r}"),
    (", }", " }"),
    (",}", "}"),
    (" , ]", " ]"),
    (" ,]", "]"),
    (",\r\n]", "\r\n]"),
    (",\n]", "\n]"),
    (",\r]", "\r]"),
    (", ]", " ]"),
    (",]", "]"),
];

/// Runs both repair passes.
pub fn sanitize(text: &str) -> String {
    let replaced = replace_trailing_commas(text);
    drop_dangling_commas(&replaced)
}

enum Segment<'a> {
    /// A string literal including its quotes (possibly unterminated).
    Literal(&'a str),
    Structural(&'a str),
}

/// Splits `text` into string literals and the structural text between them.
/// A backslash escapes the following character wherever it appears.
fn split_literals(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' if in_string => {
                segments.push(Segment::Literal(&text[start..=i]));
                start = i + 1;
                in_string = false;
            }
            '"' => {
                if start < i {
                    segments.push(Segment::Structural(&text[start..i]));
                }
                start = i;
                in_string = true;
            }
            _ => {}
        }
    }

    if start < text.len() {
        let rest = &text[start..];
        segments.push(if in_string {
            Segment::Literal(rest)
        } else {
            Segment::Structural(rest)
        });
    }

    segments
}

/// Pass 1: fixed-pattern replacement outside string literals.
fn replace_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in split_literals(text) {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Structural(s) => {
                let mut fixed = s.to_string();
                for (from, to) in TRAILING_COMMA_PATTERNS {
                    if fixed.contains(from) {
                        fixed = fixed.replace(from, to);
                    }
                }
                out.push_str(&fixed);
            }
        }
    }
    out
}

/// Pass 2: drop commas (outside strings) followed only by whitespace or
/// further commas before a `}` or `]`. Whitespace is kept.
fn drop_dangling_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            out.push(ch);
            continue;
        }
        match ch {
            '\\' => {
                escaped = true;
                out.push(ch);
            }
            '"' => {
                in_string = !in_string;
                out.push(ch);
            }
            ',' if !in_string && closes_container(&text[i + 1..]) => {}
            _ => out.push(ch),
        }
    }

    out
}

fn closes_container(rest: &str) -> bool {
    rest.chars()
        .find(|c| !c.is_ascii_whitespace() && *c != ',')
        .is_some_and(|c| c == '}' || c == ']')
}
