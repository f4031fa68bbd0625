//! Attach-once tracking
//!
//! Processed elements carry the behavior id in a space-separated
//! `data-once` attribute, the convention the host page already uses for
//! its own behaviors. Marking happens when an element is claimed, so a
//! second pass that runs while a render is still in flight skips it.

use super::dom::Placeholder;

/// Attribute listing the behaviors that already processed an element
pub const ONCE_ATTRIBUTE: &str = "data-once";

/// Whether `element` was already claimed for `id`
pub fn is_claimed<E: Placeholder>(id: &str, element: &E) -> bool {
    element
        .attribute(ONCE_ATTRIBUTE)
        .is_some_and(|value| value.split_whitespace().any(|claimed| claimed == id))
}

/// Keep the elements not yet claimed for `id` and claim them
pub fn once<E: Placeholder>(id: &str, elements: Vec<E>) -> Vec<E> {
    elements
        .into_iter()
        .filter(|element| !is_claimed(id, element))
        .inspect(|element| {
            let value = match element.attribute(ONCE_ATTRIBUTE) {
                Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), id),
                _ => id.to_string(),
            };
            element.set_attribute(ONCE_ATTRIBUTE, &value);
        })
        .collect()
}
