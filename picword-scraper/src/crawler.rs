//! Bounded-depth, breadth-first site crawler.
//!
//! [`Crawler`] is an iterator over labelled images. Pages are fetched lazily
//! as the caller pulls items, so dropping the iterator stops the crawl.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::time::{Duration, Instant};

use regex::Regex;
use reqwest::Url;

use crate::client::HttpFetch;
use crate::error::ScrapeError;
use crate::html::{ImageDescriptor, ImageFilter, extract_page};
use crate::log::{CrawlLog, CrawlLogEntry};

pub const DEFAULT_MAX_DEPTH: u32 = 1;
pub const DEFAULT_MAX_PAGES: usize = 200;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub start_urls: Vec<String>,
    pub max_depth: u32,
    /// Links must match this to be followed. `None` follows any same-site link.
    pub link_pattern: Option<Regex>,
    /// Maximum number of pages fetched.
    pub max_pages: usize,
    pub time_budget: Option<Duration>,
    pub filter: ImageFilter,
}

impl CrawlOptions {
    pub fn new(start_urls: Vec<String>) -> Self {
        Self {
            start_urls,
            max_depth: DEFAULT_MAX_DEPTH,
            link_pattern: None,
            max_pages: DEFAULT_MAX_PAGES,
            time_budget: None,
            filter: ImageFilter::default(),
        }
    }
}

/// A page waiting to be visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: Url,
    pub depth: u32,
}

/// One labelled image and the page it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlHit {
    pub page_url: String,
    pub depth: u32,
    pub image: ImageDescriptor,
}

#[derive(Debug, Default, Clone)]
pub struct CrawlStats {
    pub pages_visited: usize,
    pub pages_failed: usize,
    pub images_yielded: usize,
    pub images_skipped: usize,
    pub external_links: usize,
    /// Same-site links that did not match the link pattern.
    pub unmatched_links: usize,
    /// URLs enqueued per depth (seeds are depth 0).
    pub enqueued_by_depth: BTreeMap<u32, usize>,
    /// Set when the page or time budget ended the crawl.
    pub budget_exhausted: bool,
}

impl CrawlStats {
    pub fn enqueued_at(&self, depth: u32) -> usize {
        self.enqueued_by_depth.get(&depth).copied().unwrap_or(0)
    }
}

/// Host without a leading `www.`, so `www.site` and `site` count as one site.
fn site_of(url: &Url) -> Option<String> {
    url.host_str()
        .map(|h| h.trim_start_matches("www.").to_ascii_lowercase())
}

pub struct Crawler<F: HttpFetch> {
    fetch: F,
    options: CrawlOptions,
    sites: HashSet<String>,
    frontier: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    seen: HashSet<String>,
    seen_images: HashSet<String>,
    pending: VecDeque<CrawlHit>,
    stats: CrawlStats,
    log: CrawlLog,
    started: Instant,
    done: bool,
}

impl<F: HttpFetch> Crawler<F> {
    /// Seed the frontier with the start URLs at depth 0.
    pub fn new(fetch: F, options: CrawlOptions) -> Result<Self, ScrapeError> {
        if options.start_urls.is_empty() {
            return Err(ScrapeError::Config("no start URL given".to_string()));
        }

        let mut crawler = Self {
            fetch,
            sites: HashSet::new(),
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            seen: HashSet::new(),
            seen_images: HashSet::new(),
            pending: VecDeque::new(),
            stats: CrawlStats::default(),
            log: CrawlLog::new(),
            started: Instant::now(),
            done: false,
            options,
        };

        for start in crawler.options.start_urls.clone() {
            let url = Url::parse(start.trim())
                .ok()
                .and_then(|u| crate::html::resolve(&u, u.as_str()))
                .ok_or_else(|| ScrapeError::InvalidUrl(start.clone()))?;
            if let Some(site) = site_of(&url) {
                crawler.sites.insert(site);
            }
            crawler.enqueue(url, 0);
        }
        Ok(crawler)
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub fn log(&self) -> &CrawlLog {
        &self.log
    }

    /// Pages discovered but not yet visited.
    pub fn frontier(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.frontier.iter()
    }

    /// Give back the fetcher together with the stats and log.
    pub fn finish(self) -> (F, CrawlStats, CrawlLog) {
        (self.fetch, self.stats, self.log)
    }

    fn enqueue(&mut self, url: Url, depth: u32) -> bool {
        if !self.seen.insert(url.as_str().to_string()) {
            return false;
        }
        *self.stats.enqueued_by_depth.entry(depth).or_insert(0) += 1;
        self.frontier.push_back(FrontierEntry { url, depth });
        true
    }

    fn budget_reason(&self) -> Option<String> {
        if self.stats.pages_visited + self.stats.pages_failed >= self.options.max_pages {
            return Some(format!("page budget of {} reached", self.options.max_pages));
        }
        if let Some(budget) = self.options.time_budget
            && self.started.elapsed() >= budget
        {
            return Some(format!("time budget of {}s reached", budget.as_secs()));
        }
        None
    }

    fn visit(&mut self, entry: FrontierEntry) {
        let url = entry.url.as_str().to_string();
        self.visited.insert(url.clone());

        let page = match self.fetch_page(&url) {
            Ok(body) => extract_page(&body, &entry.url, &self.options.filter),
            Err(e) => {
                log::warn!("Skipping {url}: {e}");
                self.stats.pages_failed += 1;
                self.log.add(CrawlLogEntry::Failed {
                    url,
                    depth: entry.depth,
                    message: e.to_string(),
                });
                return;
            }
        };
        self.stats.pages_visited += 1;
        self.stats.images_skipped += page.skipped_images;

        let mut images = 0;
        for image in page.images {
            if !self.seen_images.insert(image.url.clone()) {
                self.stats.images_skipped += 1;
                continue;
            }
            images += 1;
            self.pending.push_back(CrawlHit {
                page_url: url.clone(),
                depth: entry.depth,
                image,
            });
        }

        let mut enqueued = 0;
        if entry.depth < self.options.max_depth {
            for link in page.links {
                if !site_of(&link).is_some_and(|s| self.sites.contains(&s)) {
                    self.stats.external_links += 1;
                    continue;
                }
                if let Some(pattern) = &self.options.link_pattern
                    && !pattern.is_match(link.as_str())
                {
                    self.stats.unmatched_links += 1;
                    continue;
                }
                if self.enqueue(link, entry.depth + 1) {
                    enqueued += 1;
                }
            }
        }

        log::info!(
            "Visited {url} (depth {}): {images} images, {enqueued} links queued",
            entry.depth
        );
        self.log.add(CrawlLogEntry::Visited {
            url,
            depth: entry.depth,
            images,
            enqueued,
        });
    }

    fn fetch_page(&mut self, url: &str) -> Result<String, ScrapeError> {
        let response = self.fetch.get(url)?;
        if !response.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        if !response.is_html() {
            return Err(ScrapeError::NotHtml {
                url: url.to_string(),
                content_type: response.content_type.clone().unwrap_or_default(),
            });
        }
        Ok(response.text().into_owned())
    }
}

impl<F: HttpFetch> Iterator for Crawler<F> {
    type Item = CrawlHit;

    fn next(&mut self) -> Option<CrawlHit> {
        loop {
            if let Some(hit) = self.pending.pop_front() {
                self.stats.images_yielded += 1;
                return Some(hit);
            }
            if self.done {
                return None;
            }
            if let Some(reason) = self.budget_reason()
                && !self.frontier.is_empty()
            {
                log::warn!("Crawl stopped: {reason}");
                self.stats.budget_exhausted = true;
                self.log.add(CrawlLogEntry::Stopped { reason });
                self.done = true;
                return None;
            }
            let Some(entry) = self.frontier.pop_front() else {
                self.done = true;
                return None;
            };
            if entry.depth > self.options.max_depth || self.visited.contains(entry.url.as_str()) {
                continue;
            }
            self.visit(entry);
        }
    }
}

#[cfg(test)]
#[path = "tests/crawler_tests.rs"]
mod tests;
