//! Field-reference interpolation in resolved string fields

use crate::domain::annotation::{AnnotationDescriptor, AnnotationInstance};
use crate::domain::host::Reflectable;
use crate::domain::value::Value;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Regex for reference markers: `{$identifier}`
fn marker_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{\$([A-Za-z_][A-Za-z0-9_]*)\}").unwrap())
}

/// Rewrite `{$field}` markers in the instance's declared string fields
///
/// Each marker is replaced by the host's textual value for that field, or
/// the empty string when the host exposes no such field. Replacement is a
/// single left-to-right pass per field; substituted text is not rescanned.
pub fn interpolate_fields(
    instance: &mut AnnotationInstance,
    descriptor: &AnnotationDescriptor,
    host: &dyn Reflectable,
) {
    for field in descriptor.fields() {
        let Some(Value::Str(text)) = instance.field(field) else {
            continue;
        };

        if !text.contains("{$") {
            continue;
        }

        let replaced = marker_regex().replace_all(&text, |caps: &Captures| {
            host.field_text(&caps[1]).unwrap_or_default()
        });

        instance.assign_raw(field, Value::Str(replaced.into_owned()));
    }
}
