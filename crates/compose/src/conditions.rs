//! Evaluation of conditional visibility against a render context.
//!
//! Only the closed set of [`Condition`] variants is understood. Anything the
//! evaluator cannot decide (an unrecognized expression, or a comparison on an
//! unknown counter) leaves the item visible, whether it came from `showIf`
//! or `hideIf`.

use serde_json::Value;
use tessera_types::{
    Condition, Conditional, IMAGE_CONTENT_FIELDS, IMAGE_MODULE_ID, RenderContext, has_content,
    has_text_content,
};

/// Where a named counter reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSource {
    pub counter: &'static str,
    pub module_id: &'static str,
    /// The list field whose non-empty entries are counted.
    pub field: &'static str,
}

/// Counters available to comparison conditions.
pub const COUNTERS: &[CounterSource] = &[
    CounterSource {
        counter: "bulletCount",
        module_id: "bullets",
        field: "items",
    },
    CounterSource {
        counter: "textFieldCount",
        module_id: "textFields",
        field: "fields",
    },
];

/// Resolves a counter by name. Returns `None` for unknown counters.
///
/// A disabled module, missing data or a missing list all count as zero.
pub fn counter_value(counter: &str, context: &RenderContext) -> Option<i64> {
    let source = COUNTERS.iter().find(|c| c.counter == counter)?;
    if !context.is_enabled(source.module_id) {
        return Some(0);
    }
    let count = context
        .module_data(source.module_id)
        .and_then(|data| match data {
            Value::Array(items) => Some(items),
            other => other.get(source.field).and_then(Value::as_array),
        })
        .map(|items| items.iter().filter(|item| has_content(item)).count())
        .unwrap_or(0);
    Some(count as i64)
}

/// Returns true if a module's data holds real content.
///
/// Image data is judged by its content fields when any are present, so an
/// empty `url` next to numeric style fields is not an image.
pub fn module_has_content(module_id: &str, data: &Value) -> bool {
    match data {
        Value::Object(fields)
            if module_id == IMAGE_MODULE_ID
                && IMAGE_CONTENT_FIELDS.iter().any(|f| fields.contains_key(*f)) =>
        {
            IMAGE_CONTENT_FIELDS
                .iter()
                .filter_map(|f| fields.get(*f))
                .any(has_text_content)
        }
        _ => has_text_content(data),
    }
}

/// Decides a condition, or returns `None` when it cannot be decided.
pub fn try_evaluate(condition: &Condition, context: &RenderContext) -> Option<bool> {
    match condition {
        Condition::HasModuleWithContent(module_id) => Some(
            context.is_enabled(module_id)
                && context
                    .module_data(module_id)
                    .is_some_and(|data| module_has_content(module_id, data)),
        ),
        Condition::Comparison(comparison) => match counter_value(&comparison.counter, context) {
            Some(count) => Some(comparison.op.compare(count, comparison.value)),
            None => {
                log::debug!("Unknown counter '{}' in condition", comparison.counter);
                None
            }
        },
        Condition::Unrecognized(expr) => {
            log::debug!("Unrecognized condition '{}', treating as visible", expr);
            None
        }
    }
}

/// Evaluates a condition as a `showIf`; undecidable conditions are true.
pub fn evaluate_condition(condition: &Condition, context: &RenderContext) -> bool {
    try_evaluate(condition, context).unwrap_or(true)
}

/// Returns true if an item with this `conditional` block should render.
pub fn is_visible(conditional: &Conditional, context: &RenderContext) -> bool {
    let shown = conditional
        .show_if
        .as_ref()
        .is_none_or(|c| evaluate_condition(c, context));
    let hidden = conditional
        .hide_if
        .as_ref()
        .is_some_and(|c| try_evaluate(c, context).unwrap_or(false));
    shown && !hidden
}
