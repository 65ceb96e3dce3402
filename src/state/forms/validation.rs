//! Field validation engine
//!
//! Pure functions: a schema plus a raw value in, a verdict out. Rules run in
//! a fixed order and the first failing rule decides the message.

use super::field::{FieldKind, FieldSchema};
use crate::locale::{max_length_message, Language, Msg};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static MSISDN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{6,14}$").expect("valid msisdn regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9+._%\-]{1,256}@[A-Za-z0-9][A-Za-z0-9\-]{0,64}(\.[A-Za-z0-9][A-Za-z0-9\-]{0,25})+$",
    )
    .expect("valid email regex")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:19|20)\d{2}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$")
        .expect("valid date regex")
});

/// Outcome of validating one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

/// Validate `value` against `schema`, producing messages in `language`
pub fn validate(schema: &FieldSchema, value: &str, language: Language) -> ValidationResult {
    let custom_or = |fallback: Msg| -> String {
        schema
            .error_message
            .as_ref()
            .map(|m| m.get(language).to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.text(language).to_string())
    };

    if value.trim().is_empty() {
        return ValidationResult::invalid(custom_or(Msg::FieldRequired));
    }

    if let Some(msg) = type_violation(&schema.kind, value) {
        return ValidationResult::invalid(msg.text(language));
    }

    if let Some(max) = schema.effective_max_length() {
        if value.chars().count() > max {
            return ValidationResult::invalid(max_length_message(max, language));
        }
    }

    if let Some(pattern) = &schema.validation_pattern {
        if !pattern.is_match(value) {
            return ValidationResult::invalid(custom_or(Msg::InvalidFormat));
        }
    }

    ValidationResult::valid()
}

fn type_violation(kind: &FieldKind, value: &str) -> Option<Msg> {
    let ok = match kind {
        FieldKind::Text => true,
        FieldKind::Number => value.parse::<f64>().is_ok(),
        FieldKind::Msisdn => MSISDN_RE.is_match(value),
        FieldKind::Email => EMAIL_RE.is_match(value),
        FieldKind::Date => DATE_RE.is_match(value),
        FieldKind::Option { .. } => !value.is_empty(),
    };
    if ok {
        return None;
    }
    Some(match kind {
        FieldKind::Number => Msg::InvalidNumber,
        FieldKind::Msisdn => Msg::InvalidPhone,
        FieldKind::Email => Msg::InvalidEmail,
        FieldKind::Date => Msg::InvalidDate,
        FieldKind::Option { .. } => Msg::InvalidOption,
        FieldKind::Text => Msg::InvalidFormat,
    })
}

/// Validate every field against its current value (missing counts as empty).
///
/// Results come back in schema order, valid ones included.
pub fn validate_all(
    fields: &[FieldSchema],
    values: &BTreeMap<String, String>,
    language: Language,
) -> Vec<(String, ValidationResult)> {
    fields
        .iter()
        .map(|schema| {
            let value = values.get(&schema.name).map(String::as_str).unwrap_or("");
            (schema.name.clone(), validate(schema, value, language))
        })
        .collect()
}

/// Names and messages of the failing entries of a `validate_all` run
pub fn failures(results: &[(String, ValidationResult)]) -> Vec<(&str, &str)> {
    results
        .iter()
        .filter(|(_, r)| !r.is_valid)
        .map(|(name, r)| (name.as_str(), r.message.as_deref().unwrap_or("")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedText;
    use crate::state::forms::field::SelectOption;

    fn schema(kind: FieldKind) -> FieldSchema {
        FieldSchema::new("f", kind, LocalizedText::plain("Field"))
    }

    fn message(result: ValidationResult) -> String {
        assert!(!result.is_valid);
        result.message.unwrap()
    }

    mod required {
        use super::*;

        #[test]
        fn test_empty_is_required_for_every_kind() {
            let kinds = vec![
                FieldKind::Text,
                FieldKind::Number,
                FieldKind::Msisdn,
                FieldKind::Email,
                FieldKind::Date,
                FieldKind::Option { options: vec![] },
            ];
            for kind in kinds {
                let result = validate(&schema(kind), "", Language::English);
                assert_eq!(message(result), "This field is required");
            }
        }

        #[test]
        fn test_whitespace_is_blank() {
            let result = validate(&schema(FieldKind::Text), "   ", Language::English);
            assert_eq!(message(result), "This field is required");
        }

        #[test]
        fn test_custom_message_used_for_blank() {
            let s = schema(FieldKind::Text)
                .with_error_message(LocalizedText::new("Name needed", "الاسم مطلوب"));
            assert_eq!(message(validate(&s, "", Language::English)), "Name needed");
            assert_eq!(message(validate(&s, "", Language::Arabic)), "الاسم مطلوب");
        }

        #[test]
        fn test_arabic_generic_message() {
            let result = validate(&schema(FieldKind::Text), "", Language::Arabic);
            assert_eq!(message(result), Msg::FieldRequired.text(Language::Arabic));
        }
    }

    mod type_checks {
        use super::*;

        #[test]
        fn test_number() {
            let s = schema(FieldKind::Number);
            assert!(validate(&s, "12.5", Language::English).is_valid);
            assert_eq!(
                message(validate(&s, "abc", Language::English)),
                "Please enter a valid number"
            );
        }

        #[test]
        fn test_msisdn() {
            let s = schema(FieldKind::Msisdn);
            assert!(validate(&s, "+971501234567", Language::English).is_valid);
            assert!(validate(&s, "971501234567", Language::English).is_valid);
            assert_eq!(
                message(validate(&s, "12", Language::English)),
                "Please enter a valid phone number"
            );
            assert!(!validate(&s, "0501234567", Language::English).is_valid);
        }

        #[test]
        fn test_email() {
            let s = schema(FieldKind::Email);
            assert!(validate(&s, "name@example.com", Language::English).is_valid);
            assert!(validate(&s, "first.last+tag@mail.example.ae", Language::English).is_valid);
            assert_eq!(
                message(validate(&s, "not-an-email", Language::English)),
                "Please enter a valid email address"
            );
            assert!(!validate(&s, "name@localhost", Language::English).is_valid);
        }

        #[test]
        fn test_date() {
            let s = schema(FieldKind::Date);
            assert!(validate(&s, "1990-05-15", Language::English).is_valid);
            assert_eq!(
                message(validate(&s, "1990-13-40", Language::English)),
                "Please enter a valid date (YYYY-MM-DD)"
            );
            assert!(!validate(&s, "1850-01-01", Language::English).is_valid);
            assert!(!validate(&s, "15/05/1990", Language::English).is_valid);
        }

        #[test]
        fn test_option_accepts_any_non_empty_value() {
            let s = schema(FieldKind::Option {
                options: vec![SelectOption::new("M", LocalizedText::plain("Male"))],
            });
            assert!(validate(&s, "M", Language::English).is_valid);
        }

        #[test]
        fn test_text_has_no_type_check() {
            assert!(validate(&schema(FieldKind::Text), "anything at all", Language::English).is_valid);
        }
    }

    mod length_and_pattern {
        use super::*;

        #[test]
        fn test_max_length_exceeded() {
            let s = schema(FieldKind::Text).with_max_length(3);
            assert!(validate(&s, "abc", Language::English).is_valid);
            assert_eq!(
                message(validate(&s, "abcd", Language::English)),
                "Maximum length is 3 characters"
            );
        }

        #[test]
        fn test_max_length_counts_chars_not_bytes() {
            let s = schema(FieldKind::Text).with_max_length(3);
            assert!(validate(&s, "أحم", Language::English).is_valid);
        }

        #[test]
        fn test_type_check_runs_before_length() {
            let s = schema(FieldKind::Number).with_max_length(2);
            assert_eq!(
                message(validate(&s, "abcdef", Language::English)),
                "Please enter a valid number"
            );
        }

        #[test]
        fn test_pattern_mismatch_generic_message() {
            let s = schema(FieldKind::Text).with_pattern("[0-9]{10,16}").unwrap();
            assert_eq!(
                message(validate(&s, "12345", Language::English)),
                "Invalid format"
            );
            assert!(validate(&s, "1234567890", Language::English).is_valid);
        }

        #[test]
        fn test_pattern_mismatch_custom_message() {
            let s = schema(FieldKind::Text)
                .with_pattern("[A-Z]+")
                .unwrap()
                .with_error_message(LocalizedText::plain("Uppercase only"));
            assert_eq!(
                message(validate(&s, "abc", Language::English)),
                "Uppercase only"
            );
        }

        #[test]
        fn test_pattern_must_match_whole_value() {
            let s = schema(FieldKind::Text).with_pattern("[0-9]+").unwrap();
            assert!(!validate(&s, "123abc", Language::English).is_valid);
        }
    }

    mod validate_all_tests {
        use super::*;

        #[test]
        fn test_missing_values_count_as_empty() {
            let fields = vec![
                FieldSchema::new("amount", FieldKind::Number, LocalizedText::plain("Amount")),
                FieldSchema::new("name", FieldKind::Text, LocalizedText::plain("Name")),
            ];
            let mut values = BTreeMap::new();
            values.insert("amount".to_string(), "10".to_string());

            let results = validate_all(&fields, &values, Language::English);
            assert_eq!(results.len(), 2);
            assert!(results[0].1.is_valid);
            assert_eq!(
                failures(&results),
                vec![("name", "This field is required")]
            );
        }

        #[test]
        fn test_results_follow_schema_order() {
            let fields = vec![
                FieldSchema::new("z", FieldKind::Text, LocalizedText::plain("Z")),
                FieldSchema::new("a", FieldKind::Text, LocalizedText::plain("A")),
            ];
            let results = validate_all(&fields, &BTreeMap::new(), Language::English);
            let names: Vec<_> = failures(&results).into_iter().map(|(n, _)| n).collect();
            assert_eq!(names, vec!["z", "a"]);
        }
    }
}
