//! Form state store for one in-progress send-money form

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Submission record handed to the backend
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub service_id: String,
    pub provider_id: String,
    pub fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// How `is_valid` is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidityMode {
    /// No recorded errors and at least one value entered
    #[default]
    Loose,
    /// Loose, plus every required field holds a non-blank value
    Strict,
}

/// Values and errors of the form for the selected service and provider
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub service_id: String,
    pub provider_id: String,
    pub form_data: BTreeMap<String, String>,
    pub validation_errors: BTreeMap<String, String>,
    pub is_valid: bool,
    pub is_submitting: bool,
    mode: ValidityMode,
    required_fields: Vec<String>,
}

impl FormState {
    pub fn new(mode: ValidityMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Switch selection; previous values and errors are dropped
    pub fn set_service_and_provider(&mut self, service_id: &str, provider_id: &str) {
        self.service_id = service_id.to_string();
        self.provider_id = provider_id.to_string();
        self.form_data.clear();
        self.validation_errors.clear();
        self.required_fields.clear();
        self.recompute_validity();
    }

    /// Field names strict mode checks for values
    pub fn set_required_fields(&mut self, names: Vec<String>) {
        self.required_fields = names;
        self.recompute_validity();
    }

    pub fn set_field_value(&mut self, name: &str, value: &str) {
        self.form_data.insert(name.to_string(), value.to_string());
        self.recompute_validity();
    }

    /// Record an error for `name`; `None` or an empty message clears it
    pub fn set_field_error(&mut self, name: &str, message: Option<&str>) {
        match message.filter(|m| !m.is_empty()) {
            Some(message) => {
                self.validation_errors
                    .insert(name.to_string(), message.to_string());
            }
            None => {
                self.validation_errors.remove(name);
            }
        }
        self.recompute_validity();
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }

    /// Reset to the empty state, keeping the validity mode
    pub fn clear(&mut self) {
        *self = Self::new(self.mode);
    }

    pub fn value(&self, name: &str) -> &str {
        self.form_data.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.validation_errors.get(name).map(String::as_str)
    }

    /// Submit is possible only when valid and idle
    pub fn can_submit(&self) -> bool {
        self.is_valid && !self.is_submitting
    }

    /// Snapshot of the current selection and values
    pub fn to_form_data(&self) -> FormData {
        FormData {
            service_id: self.service_id.clone(),
            provider_id: self.provider_id.clone(),
            fields: self.form_data.clone(),
        }
    }

    fn recompute_validity(&mut self) {
        let loose = self.validation_errors.is_empty() && !self.form_data.is_empty();
        self.is_valid = match self.mode {
            ValidityMode::Loose => loose,
            ValidityMode::Strict => {
                loose
                    && self
                        .required_fields
                        .iter()
                        .all(|name| !self.value(name).trim().is_empty())
            }
        };
    }
}
