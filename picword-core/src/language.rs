/// Languages the game ships word lists for.
///
/// This enum centralizes language identity (codes, display names, aliases
/// and script) so the rest of the pipeline never matches on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Ru,
    En,
    Es,
    Fr,
}

/// Writing system of a language, used to decide when to transliterate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Cyrillic,
    Latin,
}

/// All language variants in emission order.
const ALL_LANGUAGES: &[Language] = &[Language::Ru, Language::En, Language::Es, Language::Fr];

impl Language {
    /// Two-letter code used for folder names, file names and JSON keys.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
        }
    }

    /// English display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ru => "Russian",
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
        }
    }

    pub fn script(&self) -> Script {
        match self {
            Self::Ru => Script::Cyrillic,
            Self::En | Self::Es | Self::Fr => Script::Latin,
        }
    }

    /// All accepted names for this language (case-insensitive matching).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Ru => &["russian", "rus", "русский"],
            Self::En => &["english", "eng"],
            Self::Es => &["spanish", "spa", "espanol", "español"],
            Self::Fr => &["french", "fra", "francais", "français"],
        }
    }

    /// All supported languages.
    pub fn all() -> &'static [Language] {
        ALL_LANGUAGES
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a string cannot be parsed into a `Language`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown language: '{0}'")]
pub struct LanguageParseError(pub String);

impl std::str::FromStr for Language {
    type Err = LanguageParseError;

    /// Parse a language from its code or any alias (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        for &language in ALL_LANGUAGES {
            if language.code() == lower || language.aliases().contains(&lower.as_str()) {
                return Ok(language);
            }
        }
        Err(LanguageParseError(s.to_string()))
    }
}

impl serde::Serialize for Language {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for Language {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "tests/language_tests.rs"]
mod tests;
