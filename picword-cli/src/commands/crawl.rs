use std::collections::HashSet;
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use regex::Regex;

use picword_core::util::format_bytes_approx;
use picword_scraper::{
    AssetFetcher, AssetOutcome, ClientOptions, CrawlLogEntry, CrawlOptions, Crawler, HttpClient,
    ThumbnailSpec, sanitize_label,
};

use crate::cli_types::CrawlArgs;
use crate::error::CliError;
use crate::progress;

/// Crawl pages for labelled images, then download them as thumbnails.
pub(crate) fn run_crawl(args: CrawlArgs, quiet: bool) -> Result<(), CliError> {
    let link_pattern = args
        .pattern
        .as_deref()
        .map(Regex::new)
        .transpose()
        .map_err(|e| CliError::config(format!("invalid --pattern: {e}")))?;

    let client = HttpClient::new(&ClientOptions {
        min_interval: Duration::from_millis(args.delay_ms),
        ..ClientOptions::default()
    })?;

    let mut options = CrawlOptions::new(args.start_urls.clone());
    options.max_depth = args.depth;
    options.link_pattern = link_pattern;
    options.max_pages = args.max_pages;
    options.time_budget = args.time_budget.map(Duration::from_secs);

    log::info!(
        "Crawling {} start page(s), depth {}, up to {} pages",
        args.start_urls.len(),
        args.depth,
        args.max_pages
    );

    let mut crawler = Crawler::new(client, options)?;
    let spinner = progress::spinner(quiet);
    let mut hits = Vec::new();
    while let Some(hit) = crawler.next() {
        hits.push(hit);
        let stats = crawler.stats();
        spinner.set_message(format!(
            "{} pages, {} images found",
            stats.pages_visited,
            hits.len()
        ));
    }
    spinner.finish_and_clear();
    let (client, stats, mut crawl_log) = crawler.finish();

    log::info!(
        "  {} {} pages visited, {} images found",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.pages_visited,
        stats.images_yielded
    );
    for (depth, count) in &stats.enqueued_by_depth {
        log::info!("    depth {}: {} links queued", depth, count);
    }
    if stats.external_links > 0 || stats.unmatched_links > 0 {
        log::info!(
            "    {} external and {} non-matching links ignored",
            stats.external_links,
            stats.unmatched_links
        );
    }
    if stats.pages_failed > 0 {
        log::warn!(
            "  {} {} pages failed",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            stats.pages_failed
        );
    }
    if stats.budget_exhausted {
        log::warn!("  Crawl budget exhausted; some pages were not visited");
    }

    let (width, height) = args.size;
    let mut fetcher = AssetFetcher::new(client, &args.out)
        .with_spec(ThumbnailSpec { width, height })
        .with_photo_threshold(args.threshold);

    let bar = progress::bar(hits.len() as u64, quiet);
    let mut seen_urls = HashSet::new();
    let mut seen_labels = HashSet::new();
    let (mut saved, mut kept, mut skipped, mut bytes_written) = (0usize, 0usize, 0usize, 0u64);

    for hit in &hits {
        bar.inc(1);
        let image = &hit.image;
        if !seen_urls.insert(image.url.clone()) {
            continue;
        }
        bar.set_message(image.label.clone());

        let Some(stem) = sanitize_label(&image.label) else {
            skipped += 1;
            crawl_log.add(CrawlLogEntry::AssetSkipped {
                url: image.url.clone(),
                label: image.label.clone(),
                message: "label has no usable characters".into(),
            });
            continue;
        };
        if !seen_labels.insert(stem.to_lowercase()) {
            skipped += 1;
            crawl_log.add(CrawlLogEntry::AssetSkipped {
                url: image.url.clone(),
                label: image.label.clone(),
                message: format!("another image already saved as {stem}.png"),
            });
            continue;
        }

        match fetcher.fetch(&image.url, &image.label) {
            Ok(outcome) => {
                let kept_existing = matches!(outcome, AssetOutcome::KeptExisting { .. });
                match &outcome {
                    AssetOutcome::Saved { bytes, .. } => {
                        saved += 1;
                        bytes_written += bytes;
                    }
                    AssetOutcome::KeptExisting { .. } => kept += 1,
                }
                crawl_log.add(CrawlLogEntry::Asset {
                    url: image.url.clone(),
                    label: image.label.clone(),
                    file: outcome.path().display().to_string(),
                    kept_existing,
                });
            }
            Err(e) => {
                skipped += 1;
                bar.suspend(|| log::warn!("  {}: {}", image.label, e));
                crawl_log.add(CrawlLogEntry::AssetSkipped {
                    url: image.url.clone(),
                    label: image.label.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
    bar.finish_and_clear();

    log::info!(
        "  {} {} images saved ({}), {} kept existing",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        saved,
        format_bytes_approx(bytes_written),
        kept
    );
    if skipped > 0 {
        log::warn!(
            "  {} {} images skipped",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            skipped
        );
    }

    if !args.no_log {
        std::fs::create_dir_all(&args.out)?;
        let log_path = args.out.join(format!(
            "crawl-{}.log",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ));
        crawl_log.write_to_file(&log_path)?;
        log::info!(
            "  Crawl log: {}",
            log_path.display().if_supports_color(Stdout, |t| t.cyan())
        );
    }

    Ok(())
}
