//! Category job files.
//!
//! A job is a TOML file describing one category build: its id and names,
//! the lexicon to normalize with, how assets are named and sized, and the
//! source folders to read. Relative paths resolve against the job file's
//! directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use picword_catalog::{AssetNaming, CategoryDescriptor};
use picword_core::{Language, SourceTag};
use picword_lexicon::Lexicon;
use picword_scraper::ThumbnailSpec;
use picword_scraper::asset::{DEFAULT_PHOTO_THRESHOLD, DEFAULT_THUMBNAIL_SIZE};
use serde::Deserialize;

use crate::error::ImportError;

/// One folder of candidate images.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub tag: SourceTag,
    /// Language the file names are written in.
    pub language: Language,
    /// File names containing any of these substrings are ignored.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThumbnailConfig {
    #[serde(default = "default_thumbnail_size")]
    pub width: u32,
    #[serde(default = "default_thumbnail_size")]
    pub height: u32,
}

fn default_thumbnail_size() -> u32 {
    DEFAULT_THUMBNAIL_SIZE
}

fn default_photo_threshold() -> u64 {
    DEFAULT_PHOTO_THRESHOLD
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_THUMBNAIL_SIZE,
            height: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl From<ThumbnailConfig> for ThumbnailSpec {
    fn from(config: ThumbnailConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }
}

/// A parsed and validated category job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryJob {
    pub id: String,
    /// Lexicon file or directory.
    pub lexicon: PathBuf,
    #[serde(default)]
    pub naming: AssetNaming,
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,
    #[serde(default = "default_photo_threshold")]
    pub photo_threshold: u64,
    #[serde(default)]
    pub write_mappings: bool,
    /// Word-list file name, the same in every language folder.
    #[serde(default)]
    pub word_file: Option<String>,
    /// Image folder under `data/images`; defaults to the id.
    #[serde(default)]
    pub image_folder: Option<String>,
    #[serde(default)]
    pub names: BTreeMap<Language, String>,
    #[serde(default)]
    pub description: BTreeMap<Language, String>,
    pub sources: Vec<SourceSpec>,
}

impl CategoryJob {
    /// Load a job file and resolve its relative paths.
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ImportError::JobIo {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or(Path::new("."));
        Self::parse(&contents, path, base)
    }

    /// Parse job text. `origin` is used in error messages; relative paths
    /// are joined onto `base`.
    pub fn parse(contents: &str, origin: &Path, base: &Path) -> Result<Self, ImportError> {
        let mut job: CategoryJob = toml::from_str(contents).map_err(|source| ImportError::JobParse {
            path: origin.to_path_buf(),
            source,
        })?;
        job.validate(origin)?;

        job.lexicon = resolve(base, &job.lexicon);
        for source in &mut job.sources {
            source.path = resolve(base, &source.path);
        }
        Ok(job)
    }

    fn validate(&self, origin: &Path) -> Result<(), ImportError> {
        if self.id.is_empty()
            || !self
                .id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ImportError::job(
                origin,
                format!("id '{}' must use only a-z, 0-9 and '_'", self.id),
            ));
        }
        if self.sources.is_empty() {
            return Err(ImportError::job(origin, "no [[sources]] listed"));
        }
        if self.thumbnail.width == 0 || self.thumbnail.height == 0 {
            return Err(ImportError::job(origin, "thumbnail dimensions must be non-zero"));
        }
        if let AssetNaming::Code(prefix) = &self.naming
            && (prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(ImportError::job(
                origin,
                format!("naming code '{prefix}' must be ASCII letters or digits"),
            ));
        }
        for name in [self.word_file.as_deref(), self.image_folder.as_deref()]
            .into_iter()
            .flatten()
        {
            if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
                return Err(ImportError::job(origin, format!("'{name}' must be a plain file name")));
            }
        }
        Ok(())
    }

    /// Load the lexicon this job points at.
    pub fn load_lexicon(&self) -> Result<Lexicon, ImportError> {
        Ok(picword_lexicon::load_lexicon(&self.lexicon)?)
    }

    pub fn word_file(&self) -> String {
        self.word_file
            .clone()
            .unwrap_or_else(|| format!("{}.txt", self.id))
    }

    pub fn image_folder(&self) -> &str {
        self.image_folder.as_deref().unwrap_or(&self.id)
    }

    pub fn thumbnail_spec(&self) -> ThumbnailSpec {
        self.thumbnail.into()
    }

    /// The registry descriptor this job produces.
    pub fn descriptor(&self) -> CategoryDescriptor {
        let mut descriptor = CategoryDescriptor::new(&self.id, self.word_file());
        descriptor.image_folder = self.image_folder().to_string();
        descriptor.names = self.names.clone();
        descriptor.description = self.description.clone();
        descriptor
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
#[path = "tests/job_tests.rs"]
mod tests;
