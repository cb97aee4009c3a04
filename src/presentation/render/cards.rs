use serde::Serialize;
use serde_json::Value;

use crate::domain::ExtractionResult;

/// Separator placed between list elements when a list field is flattened for display.
pub const LIST_SEPARATOR: &str = "\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCard {
    pub title: String,
    pub value: String,
}

/// One card per extracted field, in the order the extraction agent returned them.
pub fn render_cards(result: &ExtractionResult) -> Vec<FieldCard> {
    result
        .fields()
        .map(|(name, value)| FieldCard {
            title: format_field_name(name),
            value: display_value(value),
        })
        .collect()
}

/// `"invoice_number"` becomes `"Invoice Number"`.
pub fn format_field_name(name: &str) -> String {
    title_case(&name.replace('_', " "))
}

/// `"bank-statement"` becomes `"Bank Statement Data"`.
pub fn format_type_heading(doc_type: &str) -> String {
    format!("{} Data", title_case(&doc_type.replace('-', " ")))
}

/// Uppercases every letter that follows a non-letter and lowercases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(display_scalar)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        other => display_scalar(other),
    }
}

fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
