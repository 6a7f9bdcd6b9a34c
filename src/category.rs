//! Codec for the compound FAQ category code.
//!
//! Knowledge-base articles carry an optional machine code of the form
//! `main:sub` (e.g. `technical_support:CONNECTION_WIFI`) or a bare sub-code.
//! The main half references the request-type categories; the sub half is a
//! free-form machine code.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A decoded category code. `main` is empty when the code carried no prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryCode {
    pub main: String,
    pub sub: String,
}

impl CategoryCode {
    /// Split a code on the first colon. `a:b:c` decodes to main `a`,
    /// sub `b:c`; a bare code decodes to an empty main.
    pub fn decode(code: &str) -> Self {
        if code.is_empty() {
            return CategoryCode::default();
        }
        match code.split_once(':') {
            Some((main, sub)) if !sub.is_empty() => CategoryCode {
                main: main.to_string(),
                sub: sub.to_string(),
            },
            Some((main, _)) => {
                // Trailing colon: treat the left segment as the sub-code,
                // matching the split(":", 2) behavior of the original views
                CategoryCode {
                    main: String::new(),
                    sub: main.to_string(),
                }
            }
            None => CategoryCode {
                main: String::new(),
                sub: code.to_string(),
            },
        }
    }

    /// Encode a (main, sub) pair back into a wire code. An empty sub-code
    /// after trimming yields `None`; an empty main yields the bare sub-code.
    pub fn encode(main: &str, sub: &str) -> Option<String> {
        let sub = sub.trim();
        if sub.is_empty() {
            return None;
        }
        if main.is_empty() {
            Some(sub.to_string())
        } else {
            Some(format!("{}:{}", main, sub))
        }
    }

    /// Re-encode this decoded pair
    pub fn to_code(&self) -> Option<String> {
        Self::encode(&self.main, &self.sub)
    }

    /// Human-readable label for the main half, falling back to the raw code
    pub fn main_label(&self) -> Option<&str> {
        if self.main.is_empty() {
            return None;
        }
        Some(
            MAIN_CATEGORY_LABELS
                .get(self.main.as_str())
                .copied()
                .unwrap_or(self.main.as_str()),
        )
    }
}

/// Labels for the request-type main categories, as shown by the FAQ editor
pub static MAIN_CATEGORY_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("problem", "Что-то не работает"),
        ("question", "Есть вопрос"),
        ("feedback", "Предложение или отзыв"),
        ("career", "Работа и стажировки"),
        ("partner", "Партнёрство и сотрудничество"),
        ("other", "Другое"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_code() {
        let code = CategoryCode::decode("CONNECTION_WIFI");
        assert_eq!(code.main, "");
        assert_eq!(code.sub, "CONNECTION_WIFI");
    }

    #[test]
    fn test_decode_compound_code() {
        let code = CategoryCode::decode("technical_support:CONNECTION_WIFI");
        assert_eq!(code.main, "technical_support");
        assert_eq!(code.sub, "CONNECTION_WIFI");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(CategoryCode::decode(""), CategoryCode::default());
    }

    #[test]
    fn test_decode_splits_on_first_colon_only() {
        let code = CategoryCode::decode("a:b:c");
        assert_eq!(code.main, "a");
        assert_eq!(code.sub, "b:c");
    }

    #[test]
    fn test_encode() {
        assert_eq!(
            CategoryCode::encode("technical_support", "CONNECTION_WIFI"),
            Some("technical_support:CONNECTION_WIFI".to_string())
        );
        assert_eq!(
            CategoryCode::encode("", "CONNECTION_WIFI"),
            Some("CONNECTION_WIFI".to_string())
        );
        assert_eq!(CategoryCode::encode("", ""), None);
        assert_eq!(CategoryCode::encode("problem", "  "), None);
    }

    #[test]
    fn test_encode_trims_sub() {
        assert_eq!(
            CategoryCode::encode("problem", " BILLING_TARIFF "),
            Some("problem:BILLING_TARIFF".to_string())
        );
    }

    #[test]
    fn test_roundtrip() {
        for main in ["", "problem", "question", "feedback", "career", "partner", "other"] {
            for sub in ["CONNECTION_WIFI", "BILLING_TARIFF", "X"] {
                let encoded = CategoryCode::encode(main, sub).unwrap();
                let decoded = CategoryCode::decode(&encoded);
                assert_eq!(decoded.main, main);
                assert_eq!(decoded.sub, sub);
            }
        }
    }

    #[test]
    fn test_main_label() {
        let code = CategoryCode::decode("problem:CONNECTION_WIFI");
        assert_eq!(code.main_label(), Some("Что-то не работает"));
        let unknown = CategoryCode::decode("weird:SUB");
        assert_eq!(unknown.main_label(), Some("weird"));
        let bare = CategoryCode::decode("SUB");
        assert_eq!(bare.main_label(), None);
    }
}
