//! Field schema value objects

use crate::locale::{Language, LocalizedText};
use regex::Regex;

/// One selectable entry of an option field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value (JSON `name`)
    pub value: String,
    pub label: LocalizedText,
}

impl SelectOption {
    pub fn new(value: &str, label: LocalizedText) -> Self {
        Self {
            value: value.to_string(),
            label,
        }
    }
}

/// Input kind of a field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Msisdn,
    Email,
    Date,
    Option { options: Vec<SelectOption> },
}

impl FieldKind {
    /// Map a catalog `type` string; unknown types become `Text`
    pub fn from_type_name(type_name: &str, options: Vec<SelectOption>) -> Self {
        match type_name.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "number" => Self::Number,
            "msisdn" | "phone" => Self::Msisdn,
            "email" => Self::Email,
            "date" => Self::Date,
            "option" => Self::Option { options },
            other => {
                tracing::debug!("Unknown field type '{other}', treating as text");
                Self::Text
            }
        }
    }

    /// Whether a typed character is accepted by the input
    pub fn accepts_char(&self, c: char) -> bool {
        match self {
            Self::Text | Self::Email => !c.is_control(),
            Self::Number => c.is_ascii_digit() || c == '.',
            Self::Msisdn => c.is_ascii_digit() || c == '+',
            Self::Date => c.is_ascii_digit() || c == '-',
            Self::Option { .. } => false,
        }
    }

    /// Whether `max_length` truncates input as it is typed
    pub fn enforces_max_length(&self) -> bool {
        matches!(self, Self::Text | Self::Msisdn | Self::Email)
    }

    #[cfg(test)]
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::Option { options } => options,
            _ => &[],
        }
    }
}

/// Declarative description of one form input
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Unique key within a provider, independent of locale
    pub name: String,
    pub kind: FieldKind,
    pub label: LocalizedText,
    pub placeholder: Option<LocalizedText>,
    /// Whole-value pattern, compiled anchored
    pub validation_pattern: Option<Regex>,
    pub max_length: Option<usize>,
    pub error_message: Option<LocalizedText>,
}

impl FieldSchema {
    pub fn new(name: &str, kind: FieldKind, label: LocalizedText) -> Self {
        Self {
            name: name.to_string(),
            kind,
            label,
            placeholder: None,
            validation_pattern: None,
            max_length: None,
            error_message: None,
        }
    }

    /// Attach a pattern the entire value must match
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.validation_pattern = compile_pattern(pattern)?;
        Ok(self)
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_placeholder(mut self, placeholder: LocalizedText) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn with_error_message(mut self, message: LocalizedText) -> Self {
        self.error_message = Some(message);
        self
    }

    pub fn label(&self, language: Language) -> &str {
        self.label.get(language)
    }

    /// Positive length limit, if any
    pub fn effective_max_length(&self) -> Option<usize> {
        self.max_length.filter(|max| *max > 0)
    }
}

/// Compile a catalog pattern so it must match the whole value.
/// An empty pattern means "no pattern".
pub fn compile_pattern(pattern: &str) -> Result<Option<Regex>, regex::Error> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!("^(?:{pattern})$")).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> LocalizedText {
        LocalizedText::plain(text)
    }

    mod field_kind {
        use super::*;

        #[test]
        fn test_from_type_name_known_types() {
            assert_eq!(FieldKind::from_type_name("text", vec![]), FieldKind::Text);
            assert_eq!(FieldKind::from_type_name("number", vec![]), FieldKind::Number);
            assert_eq!(FieldKind::from_type_name("msisdn", vec![]), FieldKind::Msisdn);
            assert_eq!(FieldKind::from_type_name("phone", vec![]), FieldKind::Msisdn);
            assert_eq!(FieldKind::from_type_name("email", vec![]), FieldKind::Email);
            assert_eq!(FieldKind::from_type_name("date", vec![]), FieldKind::Date);
        }

        #[test]
        fn test_from_type_name_is_case_insensitive() {
            assert_eq!(FieldKind::from_type_name("NUMBER", vec![]), FieldKind::Number);
        }

        #[test]
        fn test_unknown_type_falls_back_to_text() {
            assert_eq!(FieldKind::from_type_name("color", vec![]), FieldKind::Text);
        }

        #[test]
        fn test_option_keeps_options() {
            let options = vec![SelectOption::new("M", label("Male"))];
            let kind = FieldKind::from_type_name("option", options.clone());
            assert_eq!(kind.options(), options.as_slice());
        }

        #[test]
        fn test_non_option_has_no_options() {
            assert!(FieldKind::Text.options().is_empty());
        }

        #[test]
        fn test_msisdn_accepts_digits_and_plus_only() {
            assert!(FieldKind::Msisdn.accepts_char('+'));
            assert!(FieldKind::Msisdn.accepts_char('7'));
            assert!(!FieldKind::Msisdn.accepts_char('a'));
            assert!(!FieldKind::Msisdn.accepts_char('-'));
        }

        #[test]
        fn test_number_accepts_decimal_characters() {
            assert!(FieldKind::Number.accepts_char('.'));
            assert!(!FieldKind::Number.accepts_char('-'));
            assert!(!FieldKind::Number.accepts_char('e'));
        }

        #[test]
        fn test_date_accepts_digits_and_dash() {
            assert!(FieldKind::Date.accepts_char('-'));
            assert!(!FieldKind::Date.accepts_char('/'));
        }

        #[test]
        fn test_max_length_enforcement_kinds() {
            assert!(FieldKind::Text.enforces_max_length());
            assert!(FieldKind::Msisdn.enforces_max_length());
            assert!(FieldKind::Email.enforces_max_length());
            assert!(!FieldKind::Number.enforces_max_length());
            assert!(!FieldKind::Date.enforces_max_length());
        }
    }

    mod field_schema {
        use super::*;

        #[test]
        fn test_pattern_is_anchored() {
            let schema = FieldSchema::new("code", FieldKind::Text, label("Code"))
                .with_pattern("[0-9]{3}")
                .unwrap();
            let re = schema.validation_pattern.unwrap();
            assert!(re.is_match("123"));
            assert!(!re.is_match("1234"));
            assert!(!re.is_match("x123"));
        }

        #[test]
        fn test_already_anchored_pattern_still_works() {
            let schema = FieldSchema::new("amount", FieldKind::Number, label("Amount"))
                .with_pattern(r"^[0-9]+(\.[0-9]{1,2})?$")
                .unwrap();
            let re = schema.validation_pattern.unwrap();
            assert!(re.is_match("12.50"));
            assert!(!re.is_match("12.505"));
        }

        #[test]
        fn test_empty_pattern_means_none() {
            let schema = FieldSchema::new("x", FieldKind::Text, label("X"))
                .with_pattern("")
                .unwrap();
            assert!(schema.validation_pattern.is_none());
        }

        #[test]
        fn test_invalid_pattern_errors() {
            let result = FieldSchema::new("x", FieldKind::Text, label("X")).with_pattern("([");
            assert!(result.is_err());
        }

        #[test]
        fn test_zero_max_length_is_no_limit() {
            let schema = FieldSchema::new("x", FieldKind::Text, label("X")).with_max_length(0);
            assert_eq!(schema.effective_max_length(), None);
        }
    }
}
