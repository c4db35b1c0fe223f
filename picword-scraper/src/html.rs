//! Page extraction using the `scraper` crate: labelled images and links.

use reqwest::Url;
use scraper::{Html, Selector};

/// Markers that identify boilerplate images (banners, icons) and
/// placeholder labels.
#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// Case-insensitive substrings of the image URL that mark boilerplate.
    pub src_markers: Vec<String>,
    /// Case-insensitive substrings of the `alt` text that mark placeholders.
    pub alt_markers: Vec<String>,
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self {
            src_markers: ["yandex.ru", "logo", "icon", "favicon", ".svg"]
                .map(String::from)
                .to_vec(),
            alt_markers: vec!["animal_".to_string()],
        }
    }
}

impl ImageFilter {
    fn accepts(&self, src: &str, alt: &str) -> bool {
        if alt.is_empty() {
            return false;
        }
        let src = src.to_lowercase();
        let alt = alt.to_lowercase();
        !self.src_markers.iter().any(|m| src.contains(&m.to_lowercase()))
            && !self.alt_markers.iter().any(|m| alt.contains(&m.to_lowercase()))
    }
}

/// An image found on a page, with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Absolute image URL.
    pub url: String,
    /// Trimmed `alt` text.
    pub label: String,
}

/// Everything the crawler needs from one page.
#[derive(Debug, Default)]
pub struct PageExtract {
    pub images: Vec<ImageDescriptor>,
    /// Images rejected as boilerplate or unlabeled.
    pub skipped_images: usize,
    /// Absolute http(s) links with the fragment removed, in document order.
    pub links: Vec<Url>,
}

/// Parse a page and pull out labelled images and outbound links.
pub fn extract_page(body: &str, base: &Url, filter: &ImageFilter) -> PageExtract {
    let document = Html::parse_document(body);
    let mut page = PageExtract::default();

    if let Ok(sel) = Selector::parse("img") {
        for el in document.select(&sel) {
            let attrs = el.value();
            // Lazy-loaded pages keep the real source in data-src.
            let src = attrs
                .attr("src")
                .map(str::trim)
                .filter(|s| !s.is_empty() && !s.starts_with("data:"))
                .or_else(|| attrs.attr("data-src").map(str::trim))
                .unwrap_or("");
            let alt = attrs.attr("alt").map(str::trim).unwrap_or("");

            let resolved = resolve(base, src);
            match resolved {
                Some(url) if filter.accepts(url.as_str(), alt) => {
                    page.images.push(ImageDescriptor {
                        url: url.to_string(),
                        label: alt.to_string(),
                    });
                }
                _ => page.skipped_images += 1,
            }
        }
    }

    if let Ok(sel) = Selector::parse("a[href]") {
        for el in document.select(&sel) {
            if let Some(url) = el.value().attr("href").and_then(|href| resolve(base, href.trim())) {
                page.links.push(url);
            }
        }
    }

    page
}

/// Resolve a possibly relative reference to an absolute http(s) URL
/// without a fragment.
pub fn resolve(base: &Url, reference: &str) -> Option<Url> {
    if reference.is_empty() {
        return None;
    }
    let mut url = base.join(reference).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}
