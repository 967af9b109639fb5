//! Tag extraction from declaration documentation text

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Regex for valid tag names: dotted identifiers like `Info` or `ns1.FooTest`
fn name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap()
    })
}

/// Tag delimiting convention used inside documentation text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TagStyle {
    /// Bracket-delimited tags, several per block: `[Name(a, b=2)]`
    #[default]
    Bracketed,
    /// Line-prefixed tags, one per line: `@Name(a, b=2)`
    LinePrefixed,
}

impl FromStr for TagStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bracketed" => Ok(TagStyle::Bracketed),
            "line-prefixed" | "lineprefixed" => Ok(TagStyle::LinePrefixed),
            other => Err(format!(
                "Invalid tag style: {} (expected 'bracketed' or 'line-prefixed')",
                other
            )),
        }
    }
}

/// A single matched tag span, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    /// Tag name as written, short or qualified
    pub name: String,

    /// Raw text between the tag's parentheses; empty for name-only tags
    pub raw_args: String,
}

/// Extract all well-formed tags from one declaration's documentation text
///
/// Malformed spans (unterminated delimiters, empty or non-identifier names)
/// are dropped without diagnostics.
pub fn extract_tags(doc: &str, style: TagStyle) -> Vec<RawTag> {
    match style {
        TagStyle::Bracketed => extract_bracketed(doc),
        TagStyle::LinePrefixed => extract_line_prefixed(doc),
    }
}

fn extract_bracketed(doc: &str) -> Vec<RawTag> {
    let text = collapse_whitespace(doc);
    bracket_spans(&text)
        .into_iter()
        .filter_map(|span| parse_span(span))
        .collect()
}

fn extract_line_prefixed(doc: &str) -> Vec<RawTag> {
    doc.lines()
        .filter_map(|line| {
            let line = line
                .trim()
                .trim_start_matches(['*', '/'])
                .trim_start();
            let body = line.strip_prefix('@')?;
            parse_line_tag(body)
        })
        .collect()
}

/// Collapse whitespace runs so tags may span line breaks in doc blocks
fn collapse_whitespace(doc: &str) -> String {
    doc.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Top-level `[...]` spans, quote-aware and depth-counting
///
/// A nested bracket pair (a list argument, say) stays inside its enclosing
/// span and never starts a tag of its own. A span left open at end of input
/// yields nothing.
fn bracket_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start = None;
    let mut depth = 0usize;
    let mut in_single = false;
    let mut in_double = false;

    for (i, c) in text.char_indices() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '[' if !in_single && !in_double => {
                if depth == 0 {
                    start = Some(i + 1);
                }
                depth += 1;
            }
            ']' if !in_single && !in_double => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        if let Some(s) = start.take() {
                            spans.push(&text[s..i]);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    spans
}

/// Parse one extracted span into a tag, or drop it
fn parse_span(span: &str) -> Option<RawTag> {
    let span = span.trim();

    let Some(open) = span.find('(') else {
        return valid_name(span).then(|| RawTag {
            name: span.to_string(),
            raw_args: String::new(),
        });
    };

    let close = find_closing_paren(span, open)?;
    let name = span[..open].trim();

    if !valid_name(name) {
        return None;
    }

    Some(RawTag {
        name: name.to_string(),
        raw_args: span[open + 1..close].to_string(),
    })
}

/// Parse the body of an `@`-prefixed line into a tag, or drop it
///
/// Name-only tags take the first whitespace-delimited token; trailing prose
/// after the closing parenthesis is ignored.
fn parse_line_tag(body: &str) -> Option<RawTag> {
    let body = body.trim();

    let Some(open) = body.find('(') else {
        let name = body.split_whitespace().next().unwrap_or("");
        return valid_name(name).then(|| RawTag {
            name: name.to_string(),
            raw_args: String::new(),
        });
    };

    let close = find_closing_paren(body, open)?;
    let name = body[..open].trim();

    if !valid_name(name) {
        return None;
    }

    Some(RawTag {
        name: name.to_string(),
        raw_args: body[open + 1..close].to_string(),
    })
}

/// Position of the closing parenthesis for the one opened at `open`,
/// skipping quoted regions. Tag bodies do not nest calls, so the first
/// unquoted `)` closes the argument list.
fn find_closing_paren(text: &str, open: usize) -> Option<usize> {
    let mut in_single = false;
    let mut in_double = false;

    for (i, c) in text.char_indices().skip_while(|(i, _)| *i <= open) {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            ')' if !in_single && !in_double => return Some(i),
            _ => {}
        }
    }

    None
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && name_regex().is_match(name)
}
