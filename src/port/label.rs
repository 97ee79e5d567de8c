//! Human-readable titles and type annotations for ports.

use crate::flow::FieldDescriptor;
use itertools::Itertools;

/// Turns `snake_case` or `kebab-case` keys into a sentence-cased label.
///
/// `max_tokens` becomes `Max tokens`, `chat-history` becomes `Chat history`.
pub fn normal_case(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(index, word)| {
            let lower = word.to_lowercase();
            if index > 0 {
                return lower;
            }
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => lower,
            }
        })
        .join(" ")
}

/// Title of a field port: `display_name`, else the normal-cased `name`, else the key.
pub fn field_title(descriptor: &FieldDescriptor, key: &str) -> String {
    match (&descriptor.display_name, &descriptor.name) {
        (Some(display_name), _) if !display_name.is_empty() => display_name.clone(),
        (_, Some(name)) if !name.is_empty() => normal_case(name),
        _ => normal_case(key),
    }
}

/// `Type: str`, or `Type: str list` for list fields.
pub fn field_tooltip(descriptor: &FieldDescriptor) -> String {
    let suffix = if descriptor.list { " list" } else { "" };
    format!("Type: {}{}", descriptor.type_str(), suffix)
}

/// `Type: Chain | Runnable` for ports that stand for the whole node.
pub fn base_class_tooltip(base_classes: &[String]) -> String {
    format!("Type: {}", base_classes.iter().join(" | "))
}

/// The accepted-type list an aggregate port advertises to edge validation.
pub fn accepted_types(base_classes: &[String]) -> String {
    base_classes.iter().join("|")
}
