//! Headless field widgets built from schema
//!
//! `render_fields` turns a provider's schema into one widget per field. The
//! ratatui layer only draws these; edits go through `handle_input`, which
//! yields a `FieldChange` for the session to push into the store.

use super::field::{FieldKind, FieldSchema};
use super::validation::{validate, ValidationResult};
use crate::locale::{select_prompt, Language};
use std::collections::BTreeMap;

const DATE_HINT: &str = "YYYY-MM-DD";

/// A keystroke or selection aimed at one widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Char(char),
    Backspace,
    /// Wipe the input
    Clear,
    /// Next dropdown entry
    Next,
    /// Previous dropdown entry
    Prev,
}

/// Value change produced by an edit, with its validation verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub name: String,
    pub value: String,
    pub result: ValidationResult,
}

/// One dropdown entry; the sentinel has an empty value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownEntry {
    pub value: String,
    pub label: String,
}

/// Render-ready field: localized texts, current value and error line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWidget {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub placeholder: String,
    pub value: String,
    /// Hard limit applied while typing
    pub input_limit: Option<usize>,
    /// Dropdown entries, sentinel first; empty for inputs
    pub entries: Vec<DropdownEntry>,
    pub selected: usize,
    /// Error line text; hidden when `None`
    pub error: Option<String>,
}

impl FieldWidget {
    pub fn build(schema: &FieldSchema, value: &str, language: Language) -> Self {
        let label = schema.label(language).to_string();
        let placeholder = match (&schema.placeholder, &schema.kind) {
            (Some(p), _) => p.get(language).to_string(),
            (None, FieldKind::Date) => DATE_HINT.to_string(),
            (None, _) => String::new(),
        };

        let (entries, selected) = match &schema.kind {
            FieldKind::Option { options } => {
                let mut entries = vec![DropdownEntry {
                    value: String::new(),
                    label: select_prompt(&label, language),
                }];
                entries.extend(options.iter().map(|o| DropdownEntry {
                    value: o.value.clone(),
                    label: o.label.get(language).to_string(),
                }));
                let selected = entries
                    .iter()
                    .position(|e| !value.is_empty() && e.value == value)
                    .unwrap_or(0);
                (entries, selected)
            }
            _ => (Vec::new(), 0),
        };

        let input_limit = if schema.kind.enforces_max_length() {
            schema.effective_max_length()
        } else {
            None
        };

        Self {
            name: schema.name.clone(),
            kind: schema.kind.clone(),
            label,
            placeholder,
            value: if entries.is_empty() {
                value.to_string()
            } else {
                entries[selected].value.clone()
            },
            input_limit,
            entries,
            selected,
            error: None,
        }
    }

    pub fn is_dropdown(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Text to draw inside the box
    pub fn display_value(&self) -> &str {
        match self.entries.get(self.selected) {
            Some(entry) => &entry.label,
            None => &self.value,
        }
    }

    pub fn error_visible(&self) -> bool {
        self.error.is_some()
    }

    /// Show or hide the error line from a validation verdict
    pub fn apply_result(&mut self, result: &ValidationResult) {
        self.error = if result.is_valid {
            None
        } else {
            result.message.clone()
        };
    }

    /// Apply an edit; returns whether the value changed
    fn edit(&mut self, input: FieldInput) -> bool {
        if self.is_dropdown() {
            let count = self.entries.len();
            self.selected = match input {
                FieldInput::Next => (self.selected + 1) % count,
                FieldInput::Prev => (self.selected + count - 1) % count,
                FieldInput::Clear | FieldInput::Backspace => 0,
                FieldInput::Char(_) => return false,
            };
            self.value = self.entries[self.selected].value.clone();
            return true;
        }

        match input {
            FieldInput::Char(c) => {
                if !self.kind.accepts_char(c) {
                    return false;
                }
                if let Some(limit) = self.input_limit {
                    if self.value.chars().count() >= limit {
                        return false;
                    }
                }
                self.value.push(c);
                true
            }
            FieldInput::Backspace => self.value.pop().is_some(),
            FieldInput::Clear => {
                let changed = !self.value.is_empty();
                self.value.clear();
                changed
            }
            FieldInput::Next | FieldInput::Prev => false,
        }
    }
}

/// Build one widget per field in schema order, seeded from `values`
pub fn render_fields(
    fields: &[FieldSchema],
    values: &BTreeMap<String, String>,
    language: Language,
) -> Vec<FieldWidget> {
    fields
        .iter()
        .map(|schema| {
            let value = values.get(&schema.name).map(String::as_str).unwrap_or("");
            FieldWidget::build(schema, value, language)
        })
        .collect()
}

/// Apply `input` to `widget`, validate the new value and update the error line.
///
/// Returns `None` when the input was rejected or changed nothing.
pub fn handle_input(
    widget: &mut FieldWidget,
    schema: &FieldSchema,
    input: FieldInput,
    language: Language,
) -> Option<FieldChange> {
    if !widget.edit(input) {
        return None;
    }
    let result = validate(schema, &widget.value, language);
    widget.apply_result(&result);
    Some(FieldChange {
        name: widget.name.clone(),
        value: widget.value.clone(),
        result,
    })
}
