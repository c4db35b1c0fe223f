//! Image download and thumbnail normalization.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat};

use crate::client::HttpFetch;
use crate::error::ScrapeError;

pub const DEFAULT_THUMBNAIL_SIZE: u32 = 300;
/// Files above this size are treated as curated photos and never replaced.
pub const DEFAULT_PHOTO_THRESHOLD: u64 = 50_000;

/// Fixed output dimensions for catalog images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSpec {
    pub width: u32,
    pub height: u32,
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_THUMBNAIL_SIZE,
            height: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

/// Turn a label into a file-name stem.
///
/// Keeps letters, digits, `_` and `-`; whitespace runs become a single `_`.
/// Returns `None` when nothing usable is left.
pub fn sanitize_label(label: &str) -> Option<String> {
    let kept: String = label
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    let joined = kept.split_whitespace().collect::<Vec<_>>().join("_");
    let trimmed = joined.trim_matches(|c| c == '_' || c == '-');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Decode an image, convert it to RGB, resize it to the thumbnail size and
/// encode it as PNG.
pub fn prepare_image(bytes: &[u8], spec: ThumbnailSpec, label: &str) -> Result<Vec<u8>, ScrapeError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| ScrapeError::decode(label, e))?;
    let rgb = decoded.to_rgb8();
    let resized = imageops::resize(&rgb, spec.width, spec.height, FilterType::Lanczos3);

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(resized).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

/// What happened to an asset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    Saved { path: PathBuf, bytes: u64 },
    /// A curated photo was already there and was left alone.
    KeptExisting { path: PathBuf, bytes: u64 },
}

impl AssetOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Saved { path, .. } | Self::KeptExisting { path, .. } => path,
        }
    }
}

/// GET an image URL, rejecting HTTP errors and declared non-image content.
pub fn download_image<F: HttpFetch + ?Sized>(
    fetch: &mut F,
    url: &str,
    label: &str,
) -> Result<Vec<u8>, ScrapeError> {
    let response = fetch.get(url)?;
    if !response.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }
    if response.is_declared_non_image() {
        return Err(ScrapeError::decode(
            label,
            format!(
                "content type {}",
                response.content_type.as_deref().unwrap_or_default()
            ),
        ));
    }
    Ok(response.body)
}

/// Size of an existing file above `threshold`, if any.
pub fn existing_photo(path: &Path, threshold: u64) -> Option<u64> {
    std::fs::metadata(path)
        .ok()
        .map(|m| m.len())
        .filter(|&len| len > threshold)
}

/// Downloads images into a directory as `<sanitized label>.png`.
pub struct AssetFetcher<F: HttpFetch> {
    fetch: F,
    dest_dir: PathBuf,
    spec: ThumbnailSpec,
    photo_threshold: u64,
}

impl<F: HttpFetch> AssetFetcher<F> {
    pub fn new(fetch: F, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetch,
            dest_dir: dest_dir.into(),
            spec: ThumbnailSpec::default(),
            photo_threshold: DEFAULT_PHOTO_THRESHOLD,
        }
    }

    pub fn with_spec(mut self, spec: ThumbnailSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn with_photo_threshold(mut self, threshold: u64) -> Self {
        self.photo_threshold = threshold;
        self
    }

    /// Fetch one image and write it under its sanitized label.
    pub fn fetch(&mut self, url: &str, label: &str) -> Result<AssetOutcome, ScrapeError> {
        let stem = sanitize_label(label).ok_or_else(|| ScrapeError::InvalidLabel(label.to_string()))?;
        let path = self.dest_dir.join(format!("{stem}.png"));

        if let Some(bytes) = existing_photo(&path, self.photo_threshold) {
            log::debug!("Keeping existing {} ({bytes} bytes)", path.display());
            return Ok(AssetOutcome::KeptExisting { path, bytes });
        }

        let body = download_image(&mut self.fetch, url, label)?;
        let png = prepare_image(&body, self.spec, label)?;
        std::fs::create_dir_all(&self.dest_dir)?;
        std::fs::write(&path, &png)?;
        log::info!("Saved {} ({} bytes)", path.display(), png.len());
        Ok(AssetOutcome::Saved {
            path,
            bytes: png.len() as u64,
        })
    }
}

#[cfg(test)]
#[path = "tests/asset_tests.rs"]
mod tests;
