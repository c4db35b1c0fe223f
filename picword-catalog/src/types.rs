use std::collections::BTreeMap;

use picword_core::util::humanize_key;
use picword_core::{CanonicalKey, Language, SourceTag};
use serde::{Deserialize, Serialize};

/// How installed asset files are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetNaming {
    /// `PREFIX-001.png`
    Code(String),
    /// `001-<key>.png`
    NumberedLabel,
}

impl Default for AssetNaming {
    fn default() -> Self {
        Self::NumberedLabel
    }
}

impl AssetNaming {
    pub fn file_name(&self, number: u32, key: &CanonicalKey) -> String {
        match self {
            Self::Code(prefix) => format!("{}-{number:03}.png", prefix.to_uppercase()),
            Self::NumberedLabel => format!("{number:03}-{key}.png"),
        }
    }
}

/// One numbered, translated catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub number: u32,
    pub key: CanonicalKey,
    pub names: BTreeMap<Language, String>,
    pub asset_filename: String,
    pub source_tag: SourceTag,
}

impl CatalogEntry {
    /// Display name in a language; the humanized key when none was recorded.
    pub fn display_name(&self, language: Language) -> String {
        match self.names.get(&language).map(|n| n.trim()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => humanize_key(self.key.as_str()),
        }
    }
}

/// A category as listed in the runtime's category registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDescriptor {
    pub id: String,
    #[serde(default)]
    pub names: BTreeMap<Language, String>,
    #[serde(default)]
    pub description: BTreeMap<Language, String>,
    pub image_folder: String,
    #[serde(default)]
    pub word_files: BTreeMap<Language, String>,
}

impl CategoryDescriptor {
    /// Descriptor with every supported language pointing at `word_file`.
    pub fn new(id: impl Into<String>, word_file: impl Into<String>) -> Self {
        let id = id.into();
        let word_file = word_file.into();
        Self {
            image_folder: id.clone(),
            word_files: Language::all()
                .iter()
                .map(|&lang| (lang, word_file.clone()))
                .collect(),
            names: BTreeMap::new(),
            description: BTreeMap::new(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> CanonicalKey {
        CanonicalKey::new(s).unwrap()
    }

    #[test]
    fn asset_names() {
        assert_eq!(
            AssetNaming::Code("animal".into()).file_name(7, &key("fox")),
            "ANIMAL-007.png"
        );
        assert_eq!(
            AssetNaming::NumberedLabel.file_name(12, &key("bull_shark")),
            "012-bull_shark.png"
        );
        assert_eq!(
            AssetNaming::Code("A".into()).file_name(1234, &key("x")),
            "A-1234.png"
        );
    }

    #[test]
    fn descriptor_uses_runtime_field_names() {
        let mut d = CategoryDescriptor::new("animal_world", "animal_world.txt");
        d.names.insert(Language::En, "Animal World".into());
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["imageFolder"], "animal_world");
        assert_eq!(json["wordFiles"]["ru"], "animal_world.txt");
        assert_eq!(json["names"]["en"], "Animal World");

        let back: CategoryDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn display_name_falls_back_to_key() {
        let entry = CatalogEntry {
            number: 1,
            key: key("snow_leopard"),
            names: BTreeMap::from([(Language::Ru, "Ирбис".to_string()), (Language::En, " ".to_string())]),
            asset_filename: "001-snow_leopard.png".into(),
            source_tag: SourceTag::Primary,
        };
        assert_eq!(entry.display_name(Language::Ru), "Ирбис");
        assert_eq!(entry.display_name(Language::En), "Snow Leopard");
        assert_eq!(entry.display_name(Language::Fr), "Snow Leopard");
    }
}
