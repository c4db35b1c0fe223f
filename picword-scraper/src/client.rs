use std::borrow::Cow;
use std::time::{Duration, Instant};

use crate::error::ScrapeError;

pub const DEFAULT_USER_AGENT: &str = concat!("picword/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);

/// A fetched HTTP response, fully buffered.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn mime(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase())
    }

    /// HTML, or no content type at all.
    pub fn is_html(&self) -> bool {
        match self.mime() {
            Some(m) => m == "text/html" || m == "application/xhtml+xml",
            None => true,
        }
    }

    /// Whether the declared content type rules out an image. A missing
    /// content type is left to the decoder.
    pub fn is_declared_non_image(&self) -> bool {
        self.mime()
            .is_some_and(|m| !m.starts_with("image/") && m != "application/octet-stream")
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Blocking GET access to the web. The crawler and asset fetcher go through
/// this so tests can serve pages from memory.
pub trait HttpFetch {
    fn get(&mut self, url: &str) -> Result<HttpResponse, ScrapeError>;
}

impl<T: HttpFetch + ?Sized> HttpFetch for &mut T {
    fn get(&mut self, url: &str) -> Result<HttpResponse, ScrapeError> {
        (**self).get(url)
    }
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    pub timeout: Duration,
    /// Minimum time between two requests.
    pub min_interval: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}

/// HTTP client with a fixed politeness delay between requests.
pub struct HttpClient {
    http: reqwest::blocking::Client,
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl HttpClient {
    pub fn new(options: &ClientOptions) -> Result<Self, ScrapeError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout)
            .build()?;
        Ok(Self {
            http,
            min_interval: options.min_interval,
            last_request: None,
        })
    }

    fn rate_limit(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                std::thread::sleep(self.min_interval - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }
}

impl HttpFetch for HttpClient {
    fn get(&mut self, url: &str) -> Result<HttpResponse, ScrapeError> {
        self.rate_limit();
        log::debug!("GET {url}");

        let resp = self.http.get(url).send()?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes()?.to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
