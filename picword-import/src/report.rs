use std::collections::BTreeMap;
use std::path::Path;

use picword_catalog::RegistryStatus;
use picword_core::{CanonicalKey, Language, SourceTag};

use crate::install::AssetProblem;
use crate::merge::Collision;

/// A single event recorded during a category build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    Emitted {
        number: u32,
        key: CanonicalKey,
        file: String,
        tag: SourceTag,
        label: String,
    },
    InvalidLabel {
        tag: SourceTag,
        label: String,
    },
    Collision(Collision),
    AssetDropped {
        tag: SourceTag,
        label: String,
        problem: AssetProblem,
    },
    Fallback {
        key: CanonicalKey,
        language: Language,
        text: String,
    },
    KeptExisting {
        file: String,
        bytes: u64,
    },
}

/// Counts derived from a [`RunReport`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: usize,
    pub ignored_files: usize,
    pub invalid_labels: usize,
    pub fetch_failures: usize,
    pub decode_failures: usize,
    pub collisions_by_tag: BTreeMap<SourceTag, usize>,
    pub fallbacks_by_language: BTreeMap<Language, usize>,
    pub kept_existing: usize,
    pub emitted: usize,
}

impl RunSummary {
    pub fn collisions(&self) -> usize {
        self.collisions_by_tag.values().sum()
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks_by_language.values().sum()
    }
}

/// Everything a category build did, for the console summary and the
/// optional report file.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub category: String,
    pub dry_run: bool,
    /// Candidates read per source tag.
    pub scanned: BTreeMap<SourceTag, usize>,
    pub ignored_files: usize,
    /// Set once the registry has been checked.
    pub registry: Option<RegistryStatus>,
    entries: Vec<ReportEntry>,
}

impl RunReport {
    pub fn new(category: impl Into<String>, dry_run: bool) -> Self {
        Self {
            category: category.into(),
            dry_run,
            scanned: BTreeMap::new(),
            ignored_files: 0,
            registry: None,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Emitted entries in numbering order.
    pub fn emitted(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e, ReportEntry::Emitted { .. }))
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            scanned: self.scanned.values().sum(),
            ignored_files: self.ignored_files,
            ..RunSummary::default()
        };
        for entry in &self.entries {
            match entry {
                ReportEntry::Emitted { .. } => summary.emitted += 1,
                ReportEntry::InvalidLabel { .. } => summary.invalid_labels += 1,
                ReportEntry::Collision(c) => {
                    *summary.collisions_by_tag.entry(c.dropped_tag).or_insert(0) += 1;
                }
                ReportEntry::AssetDropped { problem, .. } => match problem {
                    AssetProblem::Fetch(_) => summary.fetch_failures += 1,
                    AssetProblem::Decode(_) => summary.decode_failures += 1,
                },
                ReportEntry::Fallback { language, .. } => {
                    *summary.fallbacks_by_language.entry(*language).or_insert(0) += 1;
                }
                ReportEntry::KeptExisting { .. } => summary.kept_existing += 1,
            }
        }
        summary
    }

    /// Write the report to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Build Report: {} ===", self.category)?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        if self.dry_run {
            writeln!(file, "Mode: dry run (nothing written)")?;
        }
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        let by_tag: Vec<String> = self
            .scanned
            .iter()
            .map(|(tag, n)| format!("{n} {tag}"))
            .collect();
        writeln!(
            file,
            "Scanned: {} ({}), {} files ignored",
            summary.scanned,
            by_tag.join(", "),
            summary.ignored_files
        )?;
        writeln!(file, "Invalid labels: {}", summary.invalid_labels)?;
        writeln!(
            file,
            "Dropped assets: {} fetch, {} decode",
            summary.fetch_failures, summary.decode_failures
        )?;
        let collisions: Vec<String> = summary
            .collisions_by_tag
            .iter()
            .map(|(tag, n)| format!("{n} {tag}"))
            .collect();
        writeln!(
            file,
            "Duplicates: {} ({})",
            summary.collisions(),
            collisions.join(", ")
        )?;
        let fallbacks: Vec<String> = summary
            .fallbacks_by_language
            .iter()
            .map(|(lang, n)| format!("{n} {lang}"))
            .collect();
        writeln!(
            file,
            "Translation fallbacks: {} ({})",
            summary.fallbacks(),
            fallbacks.join(", ")
        )?;
        writeln!(file, "Kept existing photos: {}", summary.kept_existing)?;
        writeln!(file, "Emitted: {}", summary.emitted)?;
        if let Some(status) = self.registry {
            let text = match status {
                RegistryStatus::New => "registered",
                RegistryStatus::Unchanged => "already registered",
            };
            writeln!(file, "Registry: {text}")?;
        }
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                ReportEntry::Emitted {
                    number,
                    key,
                    file: f,
                    tag,
                    label,
                } => {
                    writeln!(file, "[{number:>4}] {key} -> {f} ({tag}: \"{label}\")")?;
                }
                ReportEntry::InvalidLabel { tag, label } => {
                    writeln!(file, "[INVALID] \"{label}\" ({tag})")?;
                }
                ReportEntry::Collision(c) => {
                    writeln!(
                        file,
                        "[DUPLICATE] {}: kept {} \"{}\", dropped {} \"{}\"",
                        c.key, c.kept_tag, c.kept_label, c.dropped_tag, c.dropped_label
                    )?;
                }
                ReportEntry::AssetDropped {
                    tag,
                    label,
                    problem,
                } => {
                    writeln!(file, "[DROPPED] \"{label}\" ({tag}): {problem}")?;
                }
                ReportEntry::Fallback {
                    key,
                    language,
                    text,
                } => {
                    writeln!(file, "[FALLBACK] {key} ({language}): \"{text}\"")?;
                }
                ReportEntry::KeptExisting { file: f, bytes } => {
                    writeln!(file, "[KEPT] {f} ({bytes} bytes)")?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> CanonicalKey {
        CanonicalKey::new(s).unwrap()
    }

    fn sample() -> RunReport {
        let mut report = RunReport::new("animal_world", false);
        report.scanned.insert(SourceTag::Primary, 3);
        report.scanned.insert(SourceTag::Secondary, 2);
        report.ignored_files = 1;
        report.add(ReportEntry::Collision(Collision {
            key: key("fox"),
            kept_tag: SourceTag::Primary,
            kept_label: "fox_photo.jpg".into(),
            dropped_tag: SourceTag::Secondary,
            dropped_label: "лисица_фото.jpg".into(),
        }));
        report.add(ReportEntry::AssetDropped {
            tag: SourceTag::Primary,
            label: "broken.jpg".into(),
            problem: AssetProblem::Decode("bad header".into()),
        });
        report.add(ReportEntry::Emitted {
            number: 1,
            key: key("fox"),
            file: "ANIMAL-001.png".into(),
            tag: SourceTag::Primary,
            label: "fox_photo.jpg".into(),
        });
        report.add(ReportEntry::Fallback {
            key: key("fox"),
            language: Language::Fr,
            text: "Fox".into(),
        });
        report
    }

    #[test]
    fn summary_counts_each_kind() {
        let summary = sample().summary();
        assert_eq!(summary.scanned, 5);
        assert_eq!(summary.ignored_files, 1);
        assert_eq!(summary.collisions(), 1);
        assert_eq!(summary.collisions_by_tag[&SourceTag::Secondary], 1);
        assert_eq!(summary.decode_failures, 1);
        assert_eq!(summary.fetch_failures, 0);
        assert_eq!(summary.fallbacks_by_language[&Language::Fr], 1);
        assert_eq!(summary.emitted, 1);
    }

    #[test]
    fn writes_report_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("build.log");
        sample().write_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("=== Build Report: animal_world ==="));
        assert!(text.contains("Scanned: 5 (3 primary, 2 secondary), 1 files ignored"));
        assert!(text.contains("[DUPLICATE] fox: kept primary \"fox_photo.jpg\", dropped secondary \"лисица_фото.jpg\""));
        assert!(text.contains("[   1] fox -> ANIMAL-001.png"));
        assert!(text.contains("[FALLBACK] fox (fr): \"Fox\""));
    }
}
