//! Bilingual (Arabic / English) text carried on engine output.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language for formatted times and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Arabic,
    English,
}

impl FromStr for Locale {
    type Err = String;

    /// Accepts `ar`/`arabic` and `en`/`english`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Locale::Arabic),
            "en" | "english" => Ok(Locale::English),
            other => Err(format!("unknown locale '{}' (expected ar or en)", other)),
        }
    }
}

/// A message rendered in both supported languages.
///
/// The UI picks whichever side matches the user's setting; the engine always
/// fills both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub ar: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(ar: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Arabic => &self.ar,
            Locale::English => &self.en,
        }
    }
}
