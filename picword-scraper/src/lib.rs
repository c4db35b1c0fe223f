//! Web acquisition for catalog sources: a bounded crawler that finds
//! labelled images, and an asset fetcher that turns them into thumbnails.

pub mod asset;
pub mod client;
pub mod crawler;
pub mod error;
pub mod html;
pub mod log;

pub use asset::{
    AssetFetcher, AssetOutcome, ThumbnailSpec, download_image, prepare_image, sanitize_label,
};
pub use client::{ClientOptions, HttpClient, HttpFetch, HttpResponse};
pub use crawler::{CrawlHit, CrawlOptions, CrawlStats, Crawler, FrontierEntry};
pub use error::ScrapeError;
pub use html::{ImageDescriptor, ImageFilter};
pub use log::{CrawlLog, CrawlLogEntry};
