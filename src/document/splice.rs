use crate::interpreter::{
    evaluator::core::{Replacement, ReplacementKind},
    value::{core::Value, render::render_plot},
};

/// Renders a replacement as the braced text that goes into the document.
///
/// ```
/// use texcalc::{
///     document::splice::render_replacement,
///     interpreter::{
///         evaluator::core::{Replacement, ReplacementKind},
///         value::core::Value,
///     },
/// };
///
/// let replacement = Replacement { kind:  ReplacementKind::Value,
///                                 range: 0..2,
///                                 value: Value::scalar(11.0), };
/// assert_eq!(render_replacement(&replacement), "{11}");
/// ```
#[must_use]
pub fn render_replacement(replacement: &Replacement) -> String {
    match (replacement.kind, &replacement.value) {
        (ReplacementKind::Graphic, Value::Matrix(points)) => format!("{{{}}}", render_plot(points)),
        (_, value) => format!("{{{value}}}"),
    }
}

/// Replaces the given byte ranges of `text` with their rendered values.
///
/// Replacements are applied in order of position. One that overlaps an
/// earlier replacement or lies outside `text` is dropped.
#[must_use]
pub fn splice(text: &str, replacements: &[Replacement]) -> String {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by_key(|r| r.range.start);

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for replacement in ordered {
        let range = &replacement.range;
        let Some(before) = text.get(cursor..range.start) else {
            continue;
        };
        if text.get(range.clone()).is_none() {
            continue;
        }
        output.push_str(before);
        output.push_str(&render_replacement(replacement));
        cursor = range.end;
    }
    output.push_str(text.get(cursor..).unwrap_or_default());
    output
}
