//! Service catalog: services, their providers and each provider's fields
//!
//! The catalog is read from JSON once per send-money session. The wire shape
//! is parsed into private DTOs first and then converted into the typed
//! schema, compiling validation patterns along the way.

use super::field::{FieldKind, FieldSchema, SelectOption};
use crate::locale::{Language, LocalizedText};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Catalog shipped with the binary
pub const BUNDLED_CATALOG: &str = include_str!("../../../assets/send_money_services.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to load service configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse service configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to parse service configuration: invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to parse service configuration: no services defined")]
    Empty,
}

/// A transfer partner offering one service
#[derive(Debug, Clone)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

impl Provider {
    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

/// A category of transfer such as bank or wallet transfer
#[derive(Debug, Clone)]
pub struct Service {
    /// Internal id
    pub name: String,
    pub label: LocalizedText,
    pub providers: Vec<Provider>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub title: LocalizedText,
    pub services: Vec<Service>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn load_bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Load from `path` when given, otherwise the bundled catalog
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(path) => {
                tracing::info!("Loading service catalog from {}", path.display());
                Self::from_path(path)?
            }
            None => Self::load_bundled()?,
        };
        tracing::info!(
            "Loaded service catalog with {} services",
            catalog.services.len()
        );
        Ok(catalog)
    }

    pub fn service(&self, index: usize) -> Option<&Service> {
        self.services.get(index)
    }

    /// Service labels in the given locale, in catalog order
    pub fn service_labels(&self, language: Language) -> Vec<String> {
        self.services
            .iter()
            .map(|s| s.label.get(language).to_string())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    title: LocalizedText,
    #[serde(default)]
    services: Vec<RawService>,
}

#[derive(Debug, Deserialize)]
struct RawService {
    label: LocalizedText,
    name: String,
    #[serde(default)]
    providers: Vec<RawProvider>,
}

#[derive(Debug, Deserialize)]
struct RawProvider {
    name: String,
    id: String,
    #[serde(default)]
    required_fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    label: LocalizedText,
    name: String,
    #[serde(default)]
    placeholder: Option<LocalizedText>,
    #[serde(rename = "type", default)]
    field_type: Option<String>,
    #[serde(default)]
    validation: Option<String>,
    #[serde(default)]
    max_length: Option<RawMaxLength>,
    #[serde(default)]
    validation_error_message: Option<LocalizedText>,
    #[serde(default)]
    options: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMaxLength {
    Number(u64),
    Text(String),
}

impl RawMaxLength {
    /// Non-numeric strings mean "no limit"
    fn value(&self) -> Option<usize> {
        match self {
            Self::Number(n) => usize::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawOption {
    label: LocalizedText,
    name: String,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        if raw.services.is_empty() {
            return Err(CatalogError::Empty);
        }
        let services = raw
            .services
            .into_iter()
            .map(Service::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            title: raw.title,
            services,
        })
    }
}

impl TryFrom<RawService> for Service {
    type Error = CatalogError;

    fn try_from(raw: RawService) -> Result<Self, Self::Error> {
        let providers = raw
            .providers
            .into_iter()
            .map(Provider::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: raw.name,
            label: raw.label,
            providers,
        })
    }
}

impl TryFrom<RawProvider> for Provider {
    type Error = CatalogError;

    fn try_from(raw: RawProvider) -> Result<Self, Self::Error> {
        let fields = raw
            .required_fields
            .into_iter()
            .map(FieldSchema::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: raw.id,
            name: raw.name,
            fields,
        })
    }
}

impl TryFrom<RawField> for FieldSchema {
    type Error = CatalogError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let options = raw
            .options
            .into_iter()
            .map(|o| SelectOption::new(&o.name, o.label))
            .collect();
        let kind = FieldKind::from_type_name(raw.field_type.as_deref().unwrap_or("text"), options);

        let mut schema = FieldSchema::new(&raw.name, kind, raw.label);
        if let Some(pattern) = raw.validation.as_deref() {
            schema = schema
                .with_pattern(pattern)
                .map_err(|source| CatalogError::InvalidPattern {
                    field: raw.name.clone(),
                    source,
                })?;
        }
        if let Some(max_length) = raw.max_length.and_then(|m| m.value()) {
            schema = schema.with_max_length(max_length);
        }
        if let Some(placeholder) = raw.placeholder.filter(|p| !p.is_empty()) {
            schema = schema.with_placeholder(placeholder);
        }
        if let Some(message) = raw.validation_error_message.filter(|m| !m.is_empty()) {
            schema = schema.with_error_message(message);
        }
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_field(field_json: &str) -> Result<Catalog, CatalogError> {
        let json = format!(
            r#"{{
                "title": "Send",
                "services": [{{
                    "label": {{"en": "Bank", "ar": "بنك"}},
                    "name": "bank_transfer",
                    "providers": [{{
                        "name": "ABC Bank",
                        "id": "101",
                        "required_fields": [{field_json}]
                    }}]
                }}]
            }}"#
        );
        Catalog::from_json(&json)
    }

    fn only_field(catalog: &Catalog) -> &FieldSchema {
        &catalog.services[0].providers[0].fields[0]
    }

    mod bundled {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_bundled_catalog_loads() {
            let catalog = Catalog::load_bundled().unwrap();
            assert_eq!(catalog.title.get(Language::English), "Send Money");
            let names: Vec<_> = catalog.services.iter().map(|s| s.name.as_str()).collect();
            assert_eq!(names, vec!["bank_transfer", "wallet_transfer"]);
        }

        #[test]
        fn test_bundled_providers_in_order() {
            let catalog = Catalog::load_bundled().unwrap();
            let ids: Vec<_> = catalog.services[0]
                .providers
                .iter()
                .map(|p| p.id.as_str())
                .collect();
            assert_eq!(ids, vec!["101", "102", "103"]);
        }

        #[test]
        fn test_bundled_field_order_preserved() {
            let catalog = Catalog::load_bundled().unwrap();
            let names = catalog.services[0].providers[0].field_names();
            assert_eq!(
                names,
                vec!["amount", "bank_account_number", "firstname", "lastname"]
            );
        }

        #[test]
        fn test_bundled_option_field() {
            let catalog = Catalog::load_bundled().unwrap();
            let gender = catalog.services[1].providers[1].field("gender").unwrap();
            let values: Vec<_> = gender.kind.options().iter().map(|o| o.value.as_str()).collect();
            assert_eq!(values, vec!["M", "F"]);
            assert_eq!(gender.kind.options()[0].label.get(Language::Arabic), "ذكر");
        }

        #[test]
        fn test_service_labels_localized() {
            let catalog = Catalog::load_bundled().unwrap();
            assert_eq!(
                catalog.service_labels(Language::English),
                vec!["Bank Transfer", "Wallet Transfer"]
            );
            assert_eq!(
                catalog.service_labels(Language::Arabic),
                vec!["تحويل بنكي", "تحويل إلى محفظة"]
            );
        }
    }

    mod quirks {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_max_length_as_string() {
            let catalog =
                catalog_with_field(r#"{"label": "IBAN", "name": "iban", "max_length": "34"}"#)
                    .unwrap();
            assert_eq!(only_field(&catalog).max_length, Some(34));
        }

        #[test]
        fn test_max_length_as_number() {
            let catalog =
                catalog_with_field(r#"{"label": "IBAN", "name": "iban", "max_length": 34}"#)
                    .unwrap();
            assert_eq!(only_field(&catalog).max_length, Some(34));
        }

        #[test]
        fn test_non_numeric_max_length_means_no_limit() {
            let catalog =
                catalog_with_field(r#"{"label": "IBAN", "name": "iban", "max_length": "lots"}"#)
                    .unwrap();
            assert_eq!(only_field(&catalog).max_length, None);
        }

        #[test]
        fn test_missing_type_defaults_to_text() {
            let catalog = catalog_with_field(r#"{"label": "Name", "name": "name"}"#).unwrap();
            assert_eq!(only_field(&catalog).kind, FieldKind::Text);
        }

        #[test]
        fn test_unknown_type_defaults_to_text() {
            let catalog =
                catalog_with_field(r#"{"label": "Name", "name": "name", "type": "color"}"#)
                    .unwrap();
            assert_eq!(only_field(&catalog).kind, FieldKind::Text);
        }

        #[test]
        fn test_empty_validation_means_no_pattern() {
            let catalog =
                catalog_with_field(r#"{"label": "Name", "name": "name", "validation": ""}"#)
                    .unwrap();
            assert!(only_field(&catalog).validation_pattern.is_none());
        }

        #[test]
        fn test_error_message_as_plain_string() {
            let catalog = catalog_with_field(
                r#"{"label": "Name", "name": "name", "validation_error_message": "Bad name"}"#,
            )
            .unwrap();
            let message = only_field(&catalog).error_message.as_ref().unwrap();
            assert_eq!(message.get(Language::Arabic), "Bad name");
        }

        #[test]
        fn test_placeholder_as_object() {
            let catalog = catalog_with_field(
                r#"{"label": "Name", "name": "name", "placeholder": {"en": "Type", "ar": "اكتب"}}"#,
            )
            .unwrap();
            let placeholder = only_field(&catalog).placeholder.as_ref().unwrap();
            assert_eq!(placeholder.get(Language::Arabic), "اكتب");
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_invalid_pattern_fails_load() {
            let result =
                catalog_with_field(r#"{"label": "Name", "name": "name", "validation": "(["}"#);
            match result {
                Err(CatalogError::InvalidPattern { field, .. }) => assert_eq!(field, "name"),
                other => panic!("expected InvalidPattern, got {other:?}"),
            }
        }

        #[test]
        fn test_malformed_json_is_parse_error() {
            let err = Catalog::from_json("{ not json").unwrap_err();
            assert!(matches!(err, CatalogError::Parse(_)));
            assert!(err
                .to_string()
                .starts_with("Failed to parse service configuration:"));
        }

        #[test]
        fn test_empty_services_rejected() {
            let err = Catalog::from_json(r#"{"services": []}"#).unwrap_err();
            assert!(matches!(err, CatalogError::Empty));
        }

        #[test]
        fn test_missing_file_is_load_error() {
            let err = Catalog::from_path(Path::new("/nonexistent/services.json")).unwrap_err();
            assert!(matches!(err, CatalogError::Io(_)));
            assert!(err
                .to_string()
                .starts_with("Failed to load service configuration:"));
        }
    }
}
