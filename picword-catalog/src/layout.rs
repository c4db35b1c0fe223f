//! Relative paths of catalog files under the catalog root.

use std::path::PathBuf;

use picword_core::Language;

pub const REGISTRY_PATH: &str = "data/config/categories.json";

/// `data/words/<lang>/<word_file>`
pub fn word_list_path(language: Language, word_file: &str) -> PathBuf {
    PathBuf::from("data/words").join(language.code()).join(word_file)
}

/// `data/images/<folder>`
pub fn image_dir(image_folder: &str) -> PathBuf {
    PathBuf::from("data/images").join(image_folder)
}

/// `data/images/<folder>/<file>`
pub fn image_path(image_folder: &str, file_name: &str) -> PathBuf {
    image_dir(image_folder).join(file_name)
}

/// `data/image_mappings/<category>_<lang>.json`
pub fn mapping_path(category_id: &str, language: Language) -> PathBuf {
    PathBuf::from("data/image_mappings").join(format!("{category_id}_{}.json", language.code()))
}

pub fn registry_path() -> PathBuf {
    PathBuf::from(REGISTRY_PATH)
}
