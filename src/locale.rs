//! Locale handling: language selection and bilingual text

use serde::{Deserialize, Serialize};

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    /// ISO 639-1 code used in the config file
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Arabic => "ar",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Arabic => "العربية",
        }
    }

    /// Resolve a stored language code, falling back to English
    pub fn from_code(code: &str) -> Self {
        match code {
            "ar" => Self::Arabic,
            _ => Self::English,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::English => Self::Arabic,
            Self::Arabic => Self::English,
        }
    }

    pub fn is_arabic(&self) -> bool {
        matches!(self, Self::Arabic)
    }

    /// Label for the language toggle button
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Self::English => "EN | AR",
            Self::Arabic => "AR | EN",
        }
    }
}

/// Text carried in both English and Arabic
///
/// Deserializes from either an `{ "en": .., "ar": .. }` object or a plain
/// string, which is then used for both languages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Same text in both languages
    #[cfg(test)]
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            en: text.clone(),
            ar: text,
        }
    }

    /// Arabic when requested and present, English otherwise
    pub fn get(&self, language: Language) -> &str {
        if language.is_arabic() && !self.ar.is_empty() {
            &self.ar
        } else {
            &self.en
        }
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.ar.is_empty()
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Bilingual {
            #[serde(default)]
            en: String,
            #[serde(default)]
            ar: String,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Plain(String),
            Bilingual(Bilingual),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Plain(text) => LocalizedText::new(text, String::new()),
            Raw::Bilingual(b) => LocalizedText::new(b.en, b.ar),
        })
    }
}

/// Fixed UI and validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    FieldRequired,
    InvalidNumber,
    InvalidPhone,
    InvalidEmail,
    InvalidDate,
    InvalidOption,
    InvalidFormat,
    FixErrors,
    SelectService,
    SelectProvider,
    Service,
    Provider,
    Submit,
    Submitting,
}

impl Msg {
    pub fn text(self, language: Language) -> &'static str {
        let (en, ar) = match self {
            Self::FieldRequired => ("This field is required", "هذا الحقل مطلوب"),
            Self::InvalidNumber => ("Please enter a valid number", "يرجى إدخال رقم صحيح"),
            Self::InvalidPhone => (
                "Please enter a valid phone number",
                "يرجى إدخال رقم هاتف صحيح",
            ),
            Self::InvalidEmail => (
                "Please enter a valid email address",
                "يرجى إدخال بريد إلكتروني صحيح",
            ),
            Self::InvalidDate => (
                "Please enter a valid date (YYYY-MM-DD)",
                "يرجى إدخال تاريخ صحيح (YYYY-MM-DD)",
            ),
            Self::InvalidOption => ("Please select a valid option", "يرجى اختيار خيار صحيح"),
            Self::InvalidFormat => ("Invalid format", "تنسيق غير صالح"),
            Self::FixErrors => (
                "Please fix the validation errors above",
                "يرجى تصحيح الأخطاء أعلاه",
            ),
            Self::SelectService => ("Select Service", "اختر الخدمة"),
            Self::SelectProvider => ("Select Provider", "اختر المزود"),
            Self::Service => ("Service", "الخدمة"),
            Self::Provider => ("Provider", "المزود"),
            Self::Submit => ("Submit", "إرسال"),
            Self::Submitting => ("Submitting...", "جارٍ الإرسال..."),
        };
        match language {
            Language::English => en,
            Language::Arabic => ar,
        }
    }
}

/// "Maximum length is N characters" in the given language
pub fn max_length_message(max: usize, language: Language) -> String {
    match language {
        Language::English => format!("Maximum length is {max} characters"),
        Language::Arabic => format!("الحد الأقصى للطول هو {max} حرفًا"),
    }
}

/// Sentinel entry shown first in an option dropdown
pub fn select_prompt(label: &str, language: Language) -> String {
    match language {
        Language::English => format!("Select {label}"),
        Language::Arabic => format!("اختر {label}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod language {
        use super::*;

        #[test]
        fn test_default_is_english() {
            assert_eq!(Language::default(), Language::English);
        }

        #[test]
        fn test_code_round_trip() {
            assert_eq!(Language::from_code(Language::Arabic.code()), Language::Arabic);
            assert_eq!(Language::from_code(Language::English.code()), Language::English);
        }

        #[test]
        fn test_unknown_code_falls_back_to_english() {
            assert_eq!(Language::from_code("fr"), Language::English);
        }

        #[test]
        fn test_toggle() {
            assert_eq!(Language::English.toggle(), Language::Arabic);
            assert_eq!(Language::Arabic.toggle(), Language::English);
        }
    }

    mod localized_text {
        use super::*;

        #[test]
        fn test_get_prefers_arabic_when_present() {
            let text = LocalizedText::new("Amount", "المبلغ");
            assert_eq!(text.get(Language::Arabic), "المبلغ");
            assert_eq!(text.get(Language::English), "Amount");
        }

        #[test]
        fn test_get_falls_back_to_english_when_arabic_empty() {
            let text = LocalizedText::new("Amount", "");
            assert_eq!(text.get(Language::Arabic), "Amount");
        }

        #[test]
        fn test_deserialize_object() {
            let text: LocalizedText =
                serde_json::from_str(r#"{"en": "Gender", "ar": "الجنس"}"#).unwrap();
            assert_eq!(text, LocalizedText::new("Gender", "الجنس"));
        }

        #[test]
        fn test_deserialize_object_without_arabic() {
            let text: LocalizedText = serde_json::from_str(r#"{"en": "Gender"}"#).unwrap();
            assert_eq!(text.get(Language::Arabic), "Gender");
        }

        #[test]
        fn test_deserialize_plain_string() {
            let text: LocalizedText = serde_json::from_str(r#""+971501234567""#).unwrap();
            assert_eq!(text.get(Language::English), "+971501234567");
            assert_eq!(text.get(Language::Arabic), "+971501234567");
        }
    }

    #[test]
    fn test_messages_differ_by_language() {
        assert_ne!(
            Msg::FieldRequired.text(Language::English),
            Msg::FieldRequired.text(Language::Arabic)
        );
        assert_eq!(
            Msg::FieldRequired.text(Language::English),
            "This field is required"
        );
    }

    #[test]
    fn test_max_length_message() {
        assert_eq!(
            max_length_message(16, Language::English),
            "Maximum length is 16 characters"
        );
    }
}
