//! Folder source adapter: one candidate per image file.

use picword_core::{AssetRef, CandidateEntry, has_image_extension};

use crate::error::ImportError;
use crate::job::SourceSpec;

/// Candidates read from one source folder.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub spec: SourceSpec,
    pub entries: Vec<CandidateEntry>,
    /// Files ignored because of their extension or an exclude pattern.
    pub ignored: usize,
}

/// List the image files directly inside a source folder.
///
/// Hidden files, non-image files and names containing an exclude substring
/// are skipped. Entries come back sorted by file name.
pub fn scan_source(spec: &SourceSpec) -> Result<SourceBatch, ImportError> {
    if !spec.path.is_dir() {
        return Err(ImportError::SourceNotFound(spec.path.clone()));
    }

    let read_err = |source| ImportError::SourceIo {
        path: spec.path.clone(),
        source,
    };

    let mut files = Vec::new();
    let mut ignored = 0;
    for dir_entry in std::fs::read_dir(&spec.path).map_err(read_err)? {
        let dir_entry = dir_entry.map_err(read_err)?;
        let path = dir_entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping non-UTF-8 file name: {}", path.display());
            ignored += 1;
            continue;
        };
        if name.starts_with('.') || !has_image_extension(name) || is_excluded(name, &spec.exclude) {
            ignored += 1;
            continue;
        }
        files.push((name.to_string(), path));
    }
    files.sort();

    log::info!(
        "Source {} ({}, {}): {} images, {} ignored",
        spec.path.display(),
        spec.tag,
        spec.language,
        files.len(),
        ignored
    );

    let entries = files
        .into_iter()
        .map(|(name, path)| CandidateEntry::new(name, spec.tag, spec.language, AssetRef::Local(path)))
        .collect();

    Ok(SourceBatch {
        spec: spec.clone(),
        entries,
        ignored,
    })
}

fn is_excluded(name: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|p| !p.is_empty() && name.contains(p.as_str()))
}
