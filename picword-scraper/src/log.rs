use std::path::Path;

/// A single entry in the crawl log.
#[derive(Debug, Clone)]
pub enum CrawlLogEntry {
    Visited {
        url: String,
        depth: u32,
        images: usize,
        enqueued: usize,
    },
    Failed {
        url: String,
        depth: u32,
        message: String,
    },
    Asset {
        url: String,
        label: String,
        file: String,
        kept_existing: bool,
    },
    AssetSkipped {
        url: String,
        label: String,
        message: String,
    },
    Stopped {
        reason: String,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlLogSummary {
    pub pages_visited: usize,
    pub pages_failed: usize,
    pub assets_saved: usize,
    pub assets_kept: usize,
    pub assets_skipped: usize,
}

/// Collects crawl and download results and writes a log file.
#[derive(Debug, Default)]
pub struct CrawlLog {
    entries: Vec<CrawlLogEntry>,
}

impl CrawlLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: CrawlLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CrawlLogEntry] {
        &self.entries
    }

    pub fn summary(&self) -> CrawlLogSummary {
        let mut summary = CrawlLogSummary::default();
        for entry in &self.entries {
            match entry {
                CrawlLogEntry::Visited { .. } => summary.pages_visited += 1,
                CrawlLogEntry::Failed { .. } => summary.pages_failed += 1,
                CrawlLogEntry::Asset { kept_existing, .. } => {
                    if *kept_existing {
                        summary.assets_kept += 1;
                    } else {
                        summary.assets_saved += 1;
                    }
                }
                CrawlLogEntry::AssetSkipped { .. } => summary.assets_skipped += 1,
                CrawlLogEntry::Stopped { .. } => {}
            }
        }
        summary
    }

    /// Write the log to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Crawl Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(
            file,
            "Pages: {} visited, {} failed",
            summary.pages_visited, summary.pages_failed
        )?;
        writeln!(
            file,
            "Assets: {} saved, {} kept existing, {} skipped",
            summary.assets_saved, summary.assets_kept, summary.assets_skipped
        )?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                CrawlLogEntry::Visited {
                    url,
                    depth,
                    images,
                    enqueued,
                } => {
                    writeln!(
                        file,
                        "[PAGE] {} (depth {}): {} images, {} links queued",
                        url, depth, images, enqueued
                    )?;
                }
                CrawlLogEntry::Failed {
                    url,
                    depth,
                    message,
                } => {
                    writeln!(file, "[FAILED] {} (depth {}): {}", url, depth, message)?;
                }
                CrawlLogEntry::Asset {
                    url,
                    label,
                    file: f,
                    kept_existing,
                } => {
                    let tag = if *kept_existing { "KEPT" } else { "SAVED" };
                    writeln!(file, "[{}] \"{}\" -> {}", tag, label, f)?;
                    writeln!(file, "     From: {}", url)?;
                }
                CrawlLogEntry::AssetSkipped {
                    url,
                    label,
                    message,
                } => {
                    writeln!(file, "[SKIPPED] \"{}\" ({}): {}", label, url, message)?;
                }
                CrawlLogEntry::Stopped { reason } => {
                    writeln!(file, "[STOPPED] {}", reason)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_kind() {
        let mut log = CrawlLog::new();
        log.add(CrawlLogEntry::Visited {
            url: "https://a/".into(),
            depth: 0,
            images: 3,
            enqueued: 2,
        });
        log.add(CrawlLogEntry::Failed {
            url: "https://a/x".into(),
            depth: 1,
            message: "HTTP 404".into(),
        });
        log.add(CrawlLogEntry::Asset {
            url: "https://a/fox.jpg".into(),
            label: "fox".into(),
            file: "fox.png".into(),
            kept_existing: true,
        });
        log.add(CrawlLogEntry::Stopped {
            reason: "page budget".into(),
        });

        let summary = log.summary();
        assert_eq!(summary.pages_visited, 1);
        assert_eq!(summary.pages_failed, 1);
        assert_eq!(summary.assets_kept, 1);
        assert_eq!(summary.assets_saved, 0);
    }

    #[test]
    fn writes_log_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("crawl.log");
        let mut log = CrawlLog::new();
        log.add(CrawlLogEntry::AssetSkipped {
            url: "https://a/broken.jpg".into(),
            label: "Волк".into(),
            message: "not an image".into(),
        });
        log.write_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("=== Crawl Log ==="));
        assert!(text.contains("[SKIPPED] \"Волк\""));
    }
}
