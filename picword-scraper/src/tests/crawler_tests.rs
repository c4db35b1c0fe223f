use std::collections::HashMap;

use super::*;
use crate::client::HttpResponse;

/// In-memory web: URL → page. Unknown URLs answer 404.
#[derive(Default)]
struct StaticWeb {
    pages: HashMap<String, HttpResponse>,
    requests: Vec<String>,
}

impl StaticWeb {
    fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            HttpResponse {
                status: 200,
                content_type: Some("text/html; charset=utf-8".to_string()),
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    fn raw(mut self, url: &str, status: u16, content_type: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            HttpResponse {
                status,
                content_type: Some(content_type.to_string()),
                body: Vec::new(),
            },
        );
        self
    }
}

impl HttpFetch for StaticWeb {
    fn get(&mut self, url: &str) -> Result<HttpResponse, ScrapeError> {
        self.requests.push(url.to_string());
        Ok(self.pages.get(url).cloned().unwrap_or(HttpResponse {
            status: 404,
            content_type: Some("text/html".to_string()),
            body: Vec::new(),
        }))
    }
}

fn links(targets: &[&str]) -> String {
    targets
        .iter()
        .map(|t| format!("<a href=\"{t}\">link</a>"))
        .collect()
}

#[test]
fn depth_one_queues_same_site_pages_only() {
    let start = format!(
        "<img src=\"/img/fox.jpg\" alt=\"Лисица\">{}",
        links(&[
            "/a/1.html",
            "/a/2.html",
            "/a/3.html",
            "/a/4.html",
            "/a/5.html",
            "https://elsewhere.example/x.html",
            "https://cdn.other.example/y.html",
        ])
    );
    // Each depth-1 page links deeper; none of those may be queued.
    let deep = links(&["/deep/1.html", "/deep/2.html"]);
    let mut web = StaticWeb::default().page("https://zoo.example/", &start);
    for i in 1..=5 {
        web = web.page(&format!("https://zoo.example/a/{i}.html"), &deep);
    }

    let mut options = CrawlOptions::new(vec!["https://zoo.example/".to_string()]);
    options.max_depth = 1;
    let mut crawler = Crawler::new(&mut web, options).unwrap();
    let hits: Vec<CrawlHit> = crawler.by_ref().collect();
    let stats = crawler.stats().clone();
    drop(crawler);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].image.label, "Лисица");
    assert_eq!(stats.enqueued_at(0), 1);
    assert_eq!(stats.enqueued_at(1), 5);
    assert_eq!(stats.enqueued_at(2), 0);
    assert_eq!(stats.external_links, 2);
    assert_eq!(stats.pages_visited, 6);
    assert!(web.requests.iter().all(|u| u.starts_with("https://zoo.example/")));
    assert!(!web.requests.iter().any(|u| u.contains("/deep/")));
}

#[test]
fn never_visits_a_url_twice() {
    let mut web = StaticWeb::default()
        .page("https://zoo.example/", &links(&["/b.html", "/b.html#frag", "/"]))
        .page("https://zoo.example/b.html", &links(&["/", "/b.html"]));

    let mut options = CrawlOptions::new(vec!["https://zoo.example/".to_string()]);
    options.max_depth = 5;
    let mut crawler = Crawler::new(&mut web, options).unwrap();
    crawler.by_ref().for_each(drop);
    let (_, stats, _) = crawler.finish();

    assert_eq!(stats.pages_visited, 2);
    assert_eq!(web.requests.len(), 2);
}

#[test]
fn link_pattern_restricts_followed_pages() {
    let mut web = StaticWeb::default()
        .page(
            "https://zoo.example/",
            &links(&["/animals/fox.html", "/news/today.html", "/animals/wolf.html"]),
        )
        .page("https://zoo.example/animals/fox.html", "")
        .page("https://zoo.example/animals/wolf.html", "");

    let mut options = CrawlOptions::new(vec!["https://zoo.example/".to_string()]);
    options.link_pattern = Some(Regex::new(r"/animals/").unwrap());
    let mut crawler = Crawler::new(&mut web, options).unwrap();
    crawler.by_ref().for_each(drop);

    assert_eq!(crawler.stats().enqueued_at(1), 2);
    assert_eq!(crawler.stats().unmatched_links, 1);
}

#[test]
fn failed_pages_are_skipped_not_fatal() {
    let mut web = StaticWeb::default()
        .page(
            "https://zoo.example/",
            &links(&["/missing.html", "/photo.jpg", "/ok.html"]),
        )
        .raw("https://zoo.example/photo.jpg", 200, "image/jpeg")
        .page("https://zoo.example/ok.html", "<img src=\"w.jpg\" alt=\"Wolf\">");

    let options = CrawlOptions::new(vec!["https://zoo.example/".to_string()]);
    let mut crawler = Crawler::new(&mut web, options).unwrap();
    let hits: Vec<CrawlHit> = crawler.by_ref().collect();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].image.url, "https://zoo.example/w.jpg");
    assert_eq!(hits[0].depth, 1);
    assert_eq!(crawler.stats().pages_failed, 2);
    assert_eq!(crawler.stats().pages_visited, 2);
    assert_eq!(crawler.log().summary().pages_failed, 2);
}

#[test]
fn page_budget_stops_the_crawl() {
    let mut web = StaticWeb::default().page(
        "https://zoo.example/",
        &links(&["/1.html", "/2.html", "/3.html"]),
    );
    for i in 1..=3 {
        web = web.page(
            &format!("https://zoo.example/{i}.html"),
            &format!("<img src=\"/{i}.jpg\" alt=\"animal {i}\">"),
        );
    }

    let mut options = CrawlOptions::new(vec!["https://zoo.example/".to_string()]);
    options.max_pages = 2;
    let mut crawler = Crawler::new(&mut web, options).unwrap();
    let hits: Vec<CrawlHit> = crawler.by_ref().collect();

    assert_eq!(hits.len(), 1);
    assert!(crawler.stats().budget_exhausted);
    assert_eq!(crawler.frontier().count(), 2);
}

#[test]
fn duplicate_images_are_yielded_once() {
    let img = "<img src=\"/shared/fox.jpg\" alt=\"Fox\">";
    let mut web = StaticWeb::default()
        .page("https://zoo.example/", &format!("{img}{}", links(&["/2.html"])))
        .page("https://zoo.example/2.html", img);

    let options = CrawlOptions::new(vec!["https://zoo.example/".to_string()]);
    let mut crawler = Crawler::new(&mut web, options).unwrap();
    assert_eq!(crawler.by_ref().count(), 1);
    assert_eq!(crawler.stats().images_skipped, 1);
}

#[test]
fn www_prefix_counts_as_same_site() {
    let mut web = StaticWeb::default()
        .page("https://zoo.example/", &links(&["https://www.zoo.example/a.html"]))
        .page("https://www.zoo.example/a.html", "");

    let options = CrawlOptions::new(vec!["https://zoo.example/".to_string()]);
    let mut crawler = Crawler::new(&mut web, options).unwrap();
    crawler.by_ref().for_each(drop);
    assert_eq!(crawler.stats().external_links, 0);
    assert_eq!(crawler.stats().pages_visited, 2);
}

#[test]
fn rejects_bad_start_urls() {
    let mut web = StaticWeb::default();
    assert!(matches!(
        Crawler::new(&mut web, CrawlOptions::new(vec!["not a url".to_string()])),
        Err(ScrapeError::InvalidUrl(_))
    ));
    assert!(matches!(
        Crawler::new(&mut web, CrawlOptions::new(Vec::new())),
        Err(ScrapeError::Config(_))
    ));
}
