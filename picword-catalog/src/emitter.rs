//! Catalog emission: per-language word lists, optional image mappings and
//! the registry entry for one category.

use std::path::PathBuf;

use picword_core::Language;
use picword_core::wordlist::{WordLine, check_dense, parse_word_list, scrub_field};

use crate::error::CatalogError;
use crate::layout::{mapping_path, word_list_path};
use crate::mappings::mapping_json;
use crate::registry::{Registry, RegistryStatus};
use crate::store::CatalogStore;
use crate::types::{CatalogEntry, CategoryDescriptor};

#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub write_mappings: bool,
}

/// What an emission wrote.
#[derive(Debug, Clone)]
pub struct EmitSummary {
    pub entries: usize,
    pub word_lists: Vec<PathBuf>,
    pub mappings: Vec<PathBuf>,
    pub registry: RegistryStatus,
}

/// Word-list line for one entry: upper-cased display name, scrubbed fields.
pub fn word_line(entry: &CatalogEntry, language: Language) -> WordLine {
    WordLine::new(
        entry.number,
        scrub_field(&entry.display_name(language).to_uppercase()),
        scrub_field(&entry.asset_filename),
    )
}

/// Full contents of one language's word list.
pub fn render_word_list(entries: &[CatalogEntry], language: Language) -> String {
    entries
        .iter()
        .map(|e| word_line(e, language).to_line())
        .collect()
}

fn check_numbering(numbers: impl IntoIterator<Item = u32>) -> Result<(), CatalogError> {
    check_dense(numbers).map_err(|(expected, found)| CatalogError::NumberingGap { expected, found })
}

/// Write a numbered category to the store.
///
/// The registry is checked first; a conflicting descriptor stops emission
/// before any file is written. Entries must already be numbered `1..=N` in
/// order.
pub fn emit_category<S: CatalogStore + ?Sized>(
    store: &mut S,
    descriptor: &CategoryDescriptor,
    entries: &[CatalogEntry],
    options: &EmitOptions,
) -> Result<EmitSummary, CatalogError> {
    let mut registry = Registry::load(store)?;
    let status = registry.check(descriptor)?;

    check_numbering(entries.iter().map(|e| e.number))?;

    let mut word_lists = Vec::new();
    for (&language, word_file) in &descriptor.word_files {
        let path = word_list_path(language, word_file);
        let contents = render_word_list(entries, language);
        store.write(&path, contents.as_bytes())?;
        log::info!(
            "Wrote {} entries to {}",
            entries.len(),
            store.display(&path)
        );
        word_lists.push(path);
    }

    let mut mappings = Vec::new();
    if options.write_mappings {
        let bytes = mapping_json(&descriptor.image_folder, entries)
            .map_err(|e| CatalogError::json(&descriptor.id, e))?;
        for &language in descriptor.word_files.keys() {
            let path = mapping_path(&descriptor.id, language);
            store.write(&path, &bytes)?;
            mappings.push(path);
        }
    }

    if status == RegistryStatus::New {
        registry.insert(descriptor)?;
        registry.save(store)?;
        log::info!("Registered category '{}'", descriptor.id);
    } else {
        log::debug!("Category '{}' already registered", descriptor.id);
    }

    Ok(EmitSummary {
        entries: entries.len(),
        word_lists,
        mappings,
        registry: status,
    })
}

/// Parse an emitted word list and check its numbering.
pub fn read_word_list<S: CatalogStore + ?Sized>(
    store: &S,
    language: Language,
    word_file: &str,
) -> Result<Option<Vec<WordLine>>, CatalogError> {
    let path = word_list_path(language, word_file);
    let Some(text) = store.read_string(&path)? else {
        return Ok(None);
    };
    let lines = parse_word_list(&text).map_err(|source| CatalogError::WordList {
        path: store.display(&path),
        source,
    })?;
    check_numbering(lines.iter().map(|l| l.number))?;
    Ok(Some(lines))
}

#[cfg(test)]
#[path = "tests/emitter_tests.rs"]
mod tests;
