//! Argument list parsing for tag bodies

use crate::domain::value::Value;

/// Ordered positional values plus named `key=value` arguments
///
/// Named keys are unique; a later assignment to the same key overwrites the
/// earlier one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgumentList {
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl ArgumentList {
    /// Parse the raw text between a tag's parentheses
    ///
    /// With a comma outside quotes and brackets the list is comma-separated
    /// and only `key=value` segments are kept. A single argument may be
    /// positional (no `=`) or named. Whitespace around `,` and `=` is
    /// trimmed away.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let mut args = ArgumentList::default();

        if raw.is_empty() {
            return args;
        }

        let segments = split_top_level(raw);

        if segments.len() > 1 {
            for segment in segments {
                let segment = segment.trim();
                if let Some((key, value)) = split_assignment(segment) {
                    args.push_named(key, value);
                }
                // segments without `=` carry no name and are discarded
            }
        } else if let Some((key, value)) = split_assignment(raw) {
            args.push_named(key, value);
        } else {
            args.positional.push(Value::coerce(raw));
        }

        args
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named(&self) -> &[(String, Value)] {
        &self.named
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Look up a named argument without consuming it
    pub fn get_named(&self, key: &str) -> Option<&Value> {
        self.named
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Remove and return a named argument, if present
    pub fn take_named(&mut self, key: &str) -> Option<Value> {
        let idx = self.named.iter().position(|(k, _)| k == key)?;
        Some(self.named.remove(idx).1)
    }

    /// Remaining named arguments, in source order
    pub fn drain_named(&mut self) -> Vec<(String, Value)> {
        std::mem::take(&mut self.named)
    }

    fn push_named(&mut self, key: &str, value: Value) {
        if let Some(slot) = self.named.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.named.push((key.to_string(), value));
        }
    }
}

/// Split on commas that sit outside quotes and outside bracketed lists
fn split_top_level(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut in_single = false;
    let mut in_double = false;

    for (i, c) in raw.char_indices() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '[' if !in_single && !in_double => depth += 1,
            ']' if !in_single && !in_double => depth = depth.saturating_sub(1),
            ',' if !in_single && !in_double && depth == 0 => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    parts.push(&raw[start..]);
    parts
}

/// Split a `key=value` segment at the first `=` outside quotes and brackets
///
/// Returns the trimmed key and the coerced value, or `None` when the segment
/// has no usable assignment.
fn split_assignment(segment: &str) -> Option<(&str, Value)> {
    let mut depth = 0usize;
    let mut in_single = false;
    let mut in_double = false;

    for (i, c) in segment.char_indices() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '[' if !in_single && !in_double => depth += 1,
            ']' if !in_single && !in_double => depth = depth.saturating_sub(1),
            '=' if !in_single && !in_double && depth == 0 => {
                let key = segment[..i].trim();
                if key.is_empty() {
                    return None;
                }
                return Some((key, Value::coerce(&segment[i + 1..])));
            }
            _ => {}
        }
    }

    None
}
