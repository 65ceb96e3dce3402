//! Send-money session: catalog selection state machine and form focus
//!
//! A session lives for one visit of the send-money screen. It owns the
//! catalog, the two picker selections, the form store and the widgets built
//! for the selected provider.

use super::catalog::{Catalog, Provider, Service};
use super::form_state::{FormData, FormState, ValidityMode};
use super::renderer::{handle_input, render_fields, FieldInput, FieldWidget};
use super::validation::{failures, validate, validate_all};
use crate::locale::{Language, Msg};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("No provider selected")]
    NoProvider,

    #[error("{0}")]
    Invalid(String),

    #[error("Form is not complete")]
    Incomplete,

    #[error("Submission already in progress")]
    Submitting,
}

/// Focusable elements of the send-money screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ServicePicker,
    ProviderPicker,
    Field(usize),
    Submit,
}

#[derive(Debug)]
pub struct SendMoneySession {
    catalog: Catalog,
    language: Language,
    service: Option<usize>,
    provider: Option<usize>,
    form: FormState,
    widgets: Vec<FieldWidget>,
    focus: Focus,
    /// Banner shown after a rejected submit
    submit_error: Option<String>,
}

impl SendMoneySession {
    pub fn new(catalog: Catalog, language: Language, mode: ValidityMode) -> Self {
        Self {
            catalog,
            language,
            service: None,
            provider: None,
            form: FormState::new(mode),
            widgets: Vec::new(),
            focus: Focus::ServicePicker,
            submit_error: None,
        }
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn widgets(&self) -> &[FieldWidget] {
        &self.widgets
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn title(&self) -> &str {
        self.catalog.title.get(self.language)
    }

    pub fn selected_service_index(&self) -> Option<usize> {
        self.service
    }

    pub fn selected_provider_index(&self) -> Option<usize> {
        self.provider
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.service.and_then(|i| self.catalog.service(i))
    }

    pub fn selected_provider(&self) -> Option<&Provider> {
        let service = self.selected_service()?;
        self.provider.and_then(|i| service.providers.get(i))
    }

    /// Service picker entries, sentinel first
    pub fn service_entries(&self) -> Vec<String> {
        let mut entries = vec![Msg::SelectService.text(self.language).to_string()];
        entries.extend(self.catalog.service_labels(self.language));
        entries
    }

    /// Provider picker entries for the selected service, sentinel first
    pub fn provider_entries(&self) -> Vec<String> {
        let mut entries = vec![Msg::SelectProvider.text(self.language).to_string()];
        if let Some(service) = self.selected_service() {
            entries.extend(service.providers.iter().map(|p| p.name.clone()));
        }
        entries
    }

    /// Pick a service; `None` is the sentinel and resets the whole form
    pub fn select_service(&mut self, index: Option<usize>) {
        let index = index.filter(|i| *i < self.catalog.services.len());
        self.provider = None;
        self.widgets.clear();
        self.submit_error = None;

        match index {
            Some(i) => {
                self.service = Some(i);
                let service_id = self.catalog.services[i].name.clone();
                tracing::info!("Service selected: {service_id}");
                self.form.set_service_and_provider(&service_id, "");
            }
            None => {
                tracing::debug!("Service selection cleared");
                self.service = None;
                self.form.clear();
            }
        }
        self.clamp_focus();
    }

    /// Pick a provider of the selected service; `None` is the sentinel
    pub fn select_provider(&mut self, index: Option<usize>) {
        let Some(service) = self.service.and_then(|i| self.catalog.services.get(i)) else {
            return;
        };
        let service_id = service.name.clone();
        let index = index.filter(|i| *i < service.providers.len());
        self.submit_error = None;

        match index {
            Some(i) => {
                let provider = &service.providers[i];
                tracing::info!(
                    "Provider selected: {} ({}) with {} fields",
                    provider.name,
                    provider.id,
                    provider.fields.len()
                );
                self.form.set_service_and_provider(&service_id, &provider.id);
                self.form.set_required_fields(provider.field_names());
                self.widgets = render_fields(&provider.fields, &self.form.form_data, self.language);
                self.provider = Some(i);
            }
            None => {
                self.form.set_service_and_provider(&service_id, "");
                self.widgets.clear();
                self.provider = None;
            }
        }
        self.clamp_focus();
    }

    /// Relocalize everything, keeping selections and entered values
    pub fn switch_language(&mut self, language: Language) {
        if self.language == language {
            return;
        }
        self.language = language;
        let Some(provider) = self.selected_provider().cloned() else {
            return;
        };

        self.widgets = render_fields(&provider.fields, &self.form.form_data, language);
        for (widget, schema) in self.widgets.iter_mut().zip(&provider.fields) {
            if self.form.error(&schema.name).is_some() {
                let result = validate(schema, self.form.value(&schema.name), language);
                self.form
                    .set_field_error(&schema.name, result.message.as_deref());
                widget.apply_result(&result);
            }
        }
        if self.submit_error.is_some() {
            self.submit_error = Some(Msg::FixErrors.text(language).to_string());
        }
    }

    /// Route an input to the focused element
    pub fn handle_input(&mut self, input: FieldInput) {
        match self.focus {
            Focus::ServicePicker => {
                let count = self.catalog.services.len() + 1;
                let current = self.service.map(|i| i + 1).unwrap_or(0);
                if let Some(next) = cycle(current, count, input) {
                    self.select_service(next.checked_sub(1));
                }
            }
            Focus::ProviderPicker => {
                let count = self
                    .selected_service()
                    .map(|s| s.providers.len())
                    .unwrap_or(0)
                    + 1;
                let current = self.provider.map(|i| i + 1).unwrap_or(0);
                if let Some(next) = cycle(current, count, input) {
                    self.select_provider(next.checked_sub(1));
                }
            }
            Focus::Field(i) => self.edit_field(i, input),
            Focus::Submit => {}
        }
    }

    fn edit_field(&mut self, index: usize, input: FieldInput) {
        let Some(schema) = self
            .selected_provider()
            .and_then(|p| p.fields.get(index))
            .cloned()
        else {
            return;
        };
        let Some(widget) = self.widgets.get_mut(index) else {
            return;
        };
        if let Some(change) = handle_input(widget, &schema, input, self.language) {
            self.form.set_field_value(&change.name, &change.value);
            self.form
                .set_field_error(&change.name, change.result.message.as_deref());
        }
    }

    /// Validate every field and hand out the submission record.
    ///
    /// Does nothing unless the form is valid and not already submitting.
    pub fn submit(&mut self) -> Result<FormData, FormError> {
        let Some(provider) = self.selected_provider().cloned() else {
            return Err(FormError::NoProvider);
        };
        if self.form.is_submitting {
            return Err(FormError::Submitting);
        }
        if !self.form.is_valid {
            return Err(FormError::Incomplete);
        }

        let results = validate_all(&provider.fields, &self.form.form_data, self.language);
        for ((name, result), widget) in results.iter().zip(self.widgets.iter_mut()) {
            self.form.set_field_error(name, result.message.as_deref());
            widget.apply_result(result);
        }

        let failed = failures(&results);
        if !failed.is_empty() {
            tracing::info!("Submit rejected: {} invalid fields", failed.len());
            let message = Msg::FixErrors.text(self.language).to_string();
            self.submit_error = Some(message.clone());
            return Err(FormError::Invalid(message));
        }

        self.submit_error = None;
        self.form.set_submitting(true);
        let data = self.form.to_form_data();
        tracing::info!(
            "Submitting form for {}/{}",
            data.service_id,
            data.provider_id
        );
        Ok(data)
    }

    pub fn finish_submit(&mut self) {
        self.form.set_submitting(false);
    }

    /// Focusable elements in tab order
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::ServicePicker];
        if self.service.is_some() {
            order.push(Focus::ProviderPicker);
        }
        if self.provider.is_some() {
            order.extend((0..self.widgets.len()).map(Focus::Field));
            order.push(Focus::Submit);
        }
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + order.len() - 1) % order.len()];
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus_order().contains(&focus) {
            self.focus = focus;
        }
    }

    /// Keep focus on an element that still exists
    fn clamp_focus(&mut self) {
        if !self.focus_order().contains(&self.focus) {
            self.focus = if self.service.is_some() {
                Focus::ProviderPicker
            } else {
                Focus::ServicePicker
            };
        }
    }
}

/// New picker index after a Next/Prev input, or `None` for other inputs
fn cycle(current: usize, count: usize, input: FieldInput) -> Option<usize> {
    match input {
        FieldInput::Next => Some((current + 1) % count),
        FieldInput::Prev => Some((current + count - 1) % count),
        _ => None,
    }
}
