//! Asset preparation and installation into the catalog image folder.
//!
//! Preparation happens before numbering so that undecodable images drop out
//! without leaving holes in the sequence.

use std::collections::HashSet;
use std::path::PathBuf;

use picword_catalog::emitter::word_line;
use picword_catalog::layout::image_path;
use picword_catalog::{CatalogEntry, CatalogError, CatalogStore, CategoryDescriptor, read_word_list};
use picword_core::{AssetRef, Language};
use picword_scraper::{HttpFetch, ScrapeError, ThumbnailSpec, download_image, prepare_image};

/// Why an asset could not be prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetProblem {
    /// The source could not be read or downloaded.
    Fetch(String),
    /// The bytes are not a decodable image.
    Decode(String),
}

impl std::fmt::Display for AssetProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(message) => write!(f, "fetch failed: {message}"),
            Self::Decode(message) => write!(f, "decode failed: {message}"),
        }
    }
}

impl From<ScrapeError> for AssetProblem {
    fn from(e: ScrapeError) -> Self {
        if e.is_fetch_failure() {
            Self::Fetch(e.to_string())
        } else {
            Self::Decode(e.to_string())
        }
    }
}

/// Load an asset and turn it into a PNG thumbnail in memory.
///
/// Remote assets need `fetch`; without one they count as fetch failures.
pub fn prepare_asset(
    asset: &AssetRef,
    spec: ThumbnailSpec,
    label: &str,
    fetch: Option<&mut (dyn HttpFetch + '_)>,
) -> Result<Vec<u8>, AssetProblem> {
    let bytes = match asset {
        AssetRef::Local(path) => std::fs::read(path)
            .map_err(|e| AssetProblem::Fetch(format!("{}: {e}", path.display())))?,
        AssetRef::Remote(url) => {
            let fetch = fetch.ok_or_else(|| AssetProblem::Fetch(format!("{url}: no HTTP client")))?;
            download_image(fetch, url, label)?
        }
    };
    Ok(prepare_image(&bytes, spec, label)?)
}

/// What happened when an asset was installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Written { path: PathBuf, bytes: u64 },
    /// A file above the photo threshold was already there and was kept.
    KeptExisting { path: PathBuf, bytes: u64 },
}

/// Write a prepared thumbnail to `data/images/<folder>/<file_name>`.
///
/// With `keep_above: Some(threshold)` an existing file larger than the
/// threshold is a curated photo and is left alone. `None` always writes.
pub fn install_asset<S: CatalogStore + ?Sized>(
    store: &mut S,
    image_folder: &str,
    file_name: &str,
    png: &[u8],
    keep_above: Option<u64>,
) -> Result<InstallOutcome, CatalogError> {
    let path = image_path(image_folder, file_name);
    if let Some(threshold) = keep_above
        && let Some(bytes) = store.size(&path).filter(|&len| len > threshold)
    {
        log::debug!("Keeping existing {} ({bytes} bytes)", store.display(&path));
        return Ok(InstallOutcome::KeptExisting { path, bytes });
    }
    store.write(&path, png)?;
    Ok(InstallOutcome::Written {
        path,
        bytes: png.len() as u64,
    })
}

/// Which entry each image file showed after the previous build, read back
/// from that build's word lists as `(language, file, display name)`.
///
/// Code-named files (`ANIMAL-007.png`) change hands when an entry is added
/// or removed ahead of them, so an existing file only counts as a curated
/// photo while its slot still names the same entry.
#[derive(Debug, Default)]
pub struct PreviousSlots {
    owners: HashSet<(Language, String, String)>,
}

impl PreviousSlots {
    pub fn load<S: CatalogStore + ?Sized>(store: &S, descriptor: &CategoryDescriptor) -> Self {
        let mut owners = HashSet::new();
        for (&language, word_file) in &descriptor.word_files {
            match read_word_list(store, language, word_file) {
                Ok(Some(lines)) => {
                    owners.extend(lines.into_iter().map(|l| (language, l.asset, l.name)));
                }
                Ok(None) => {}
                Err(e) => log::warn!("Ignoring previous {language} word list: {e}"),
            }
        }
        Self { owners }
    }

    /// Whether the previous build paired `entry`'s file with the same name
    /// in at least one of `languages`.
    pub fn same_owner(&self, entry: &CatalogEntry, languages: impl IntoIterator<Item = Language>) -> bool {
        languages.into_iter().any(|language| {
            let line = word_line(entry, language);
            self.owners.contains(&(language, line.asset, line.name))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
