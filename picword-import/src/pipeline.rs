//! Category build: scan, normalize, merge, prepare assets, number,
//! translate, install and emit.
//!
//! Assets are prepared in memory before numbering so entries whose image
//! cannot be read or decoded drop out without leaving a gap. The registry is
//! checked before anything is written, so a conflicting category leaves the
//! catalog untouched.

use std::collections::BTreeMap;

use picword_catalog::layout::image_path;
use picword_catalog::{
    AssetNaming, CatalogEntry, CatalogStore, EmitOptions, EmitSummary, Registry, RegistryStatus,
    emit_category,
};
use picword_core::CandidateEntry;
use picword_lexicon::{Lexicon, TranslationOrigin, Translator};
use picword_scraper::HttpFetch;

use crate::error::ImportError;
use crate::install::{InstallOutcome, PreviousSlots, install_asset, prepare_asset};
use crate::job::CategoryJob;
use crate::merge::{MergedEntry, merge};
use crate::progress::ImportProgress;
use crate::report::{ReportEntry, RunReport};
use crate::sources::{SourceBatch, scan_source};

/// Everything a build needs besides the output store.
pub struct RunContext<'a> {
    pub job: &'a CategoryJob,
    pub lexicon: &'a Lexicon,
    pub progress: &'a dyn ImportProgress,
    /// Client for remote assets; local folder sources never need one.
    pub fetch: Option<&'a mut dyn HttpFetch>,
    /// Plan only: check the registry but write nothing.
    pub dry_run: bool,
}

impl<'a> RunContext<'a> {
    pub fn new(job: &'a CategoryJob, lexicon: &'a Lexicon, progress: &'a dyn ImportProgress) -> Self {
        Self {
            job,
            lexicon,
            progress,
            fetch: None,
            dry_run: false,
        }
    }

    pub fn with_fetch(mut self, fetch: &'a mut dyn HttpFetch) -> Self {
        self.fetch = Some(fetch);
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of a build.
#[derive(Debug)]
pub struct BuildOutcome {
    pub report: RunReport,
    /// The numbered catalog, whether or not it was written.
    pub entries: Vec<CatalogEntry>,
    /// `None` for a dry run.
    pub emitted: Option<EmitSummary>,
}

/// Scan every source folder listed in the job, in job order.
pub fn scan_sources(job: &CategoryJob) -> Result<Vec<SourceBatch>, ImportError> {
    job.sources.iter().map(scan_source).collect()
}

/// Build the category described by `ctx.job` from its source folders.
pub fn run_pipeline<S: CatalogStore + ?Sized>(
    ctx: &mut RunContext<'_>,
    store: &mut S,
) -> Result<BuildOutcome, ImportError> {
    ctx.progress.on_phase(&format!("Scanning sources for '{}'", ctx.job.id));
    let batches = scan_sources(ctx.job)?;
    let mut report = RunReport::new(&ctx.job.id, ctx.dry_run);
    for batch in &batches {
        *report.scanned.entry(batch.spec.tag).or_insert(0) += batch.entries.len();
        report.ignored_files += batch.ignored;
    }
    let sources = batches.into_iter().map(|b| b.entries).collect();
    build_category(ctx, store, sources, report)
}

/// Build from candidate lists that are already in memory (one per source).
///
/// `report` may already carry scan counts; everything after scanning is
/// recorded into it.
pub fn build_category<S: CatalogStore + ?Sized>(
    ctx: &mut RunContext<'_>,
    store: &mut S,
    mut sources: Vec<Vec<CandidateEntry>>,
    mut report: RunReport,
) -> Result<BuildOutcome, ImportError> {
    let job = ctx.job;
    let descriptor = job.descriptor();

    // Registry first: a conflicting descriptor stops the build before any
    // work is written.
    let registry = Registry::load(store)?;
    let status = registry.check(&descriptor)?;
    report.registry = Some(status);
    if status == RegistryStatus::Unchanged {
        log::info!("Category '{}' is already registered; rebuilding its files", job.id);
    }

    if report.scanned.is_empty() {
        for list in &sources {
            for candidate in list {
                *report.scanned.entry(candidate.source_tag).or_insert(0) += 1;
            }
        }
    }

    ctx.progress.on_phase("Normalizing labels");
    for list in &mut sources {
        for candidate in list.iter_mut() {
            ctx.lexicon.normalize_entry(candidate);
        }
    }

    ctx.progress.on_phase("Merging sources");
    let merged = merge(sources);
    for invalid in &merged.invalid {
        report.add(ReportEntry::InvalidLabel {
            tag: invalid.tag,
            label: invalid.label.clone(),
        });
    }
    for collision in &merged.collisions {
        report.add(ReportEntry::Collision(collision.clone()));
    }
    log::info!(
        "{} unique entries, {} duplicates, {} invalid labels",
        merged.entries.len(),
        merged.collisions.len(),
        merged.invalid.len()
    );

    ctx.progress.on_phase("Preparing images");
    let spec = job.thumbnail_spec();
    let total = merged.entries.len();
    let mut prepared: Vec<(MergedEntry, Vec<u8>)> = Vec::with_capacity(total);
    for (i, entry) in merged.entries.into_iter().enumerate() {
        let key = entry.key.to_string();
        let label = entry.candidate.raw_label.clone();
        match prepare_asset(&entry.candidate.asset, spec, &label, ctx.fetch.as_deref_mut()) {
            Ok(png) => prepared.push((entry, png)),
            Err(problem) => {
                log::warn!("Dropping '{label}': {problem}");
                report.add(ReportEntry::AssetDropped {
                    tag: entry.candidate.source_tag,
                    label,
                    problem,
                });
            }
        }
        ctx.progress.on_entry(i + 1, total, &key);
    }

    ctx.progress.on_phase("Numbering and translating");
    let mut translator = Translator::new(ctx.lexicon);
    let mut entries = Vec::with_capacity(prepared.len());
    for (i, (merged_entry, _)) in prepared.iter().enumerate() {
        let number = i as u32 + 1;
        let key = &merged_entry.key;
        let mut names = BTreeMap::new();
        for &language in descriptor.word_files.keys() {
            let translation = translator.translate(key, language, merged_entry.native_for(language));
            if translation.origin == TranslationOrigin::Fallback {
                report.add(ReportEntry::Fallback {
                    key: key.clone(),
                    language,
                    text: translation.text.clone(),
                });
            }
            names.insert(language, translation.text);
        }
        let asset_filename = job.naming.file_name(number, key);
        report.add(ReportEntry::Emitted {
            number,
            key: key.clone(),
            file: asset_filename.clone(),
            tag: merged_entry.candidate.source_tag,
            label: merged_entry.candidate.raw_label.clone(),
        });
        entries.push(CatalogEntry {
            number,
            key: key.clone(),
            names,
            asset_filename,
            source_tag: merged_entry.candidate.source_tag,
        });
    }

    if ctx.dry_run {
        ctx.progress.on_complete(&format!(
            "Dry run: {} entries planned for '{}'",
            entries.len(),
            job.id
        ));
        return Ok(BuildOutcome {
            report,
            entries,
            emitted: None,
        });
    }

    ctx.progress.on_phase("Installing images");
    let folder = job.image_folder();
    let previous = PreviousSlots::load(store, &descriptor);
    if previous.is_empty() {
        log::debug!("No previous word lists for '{}'", job.id);
    }
    for (i, (entry, (_, png))) in entries.iter().zip(&prepared).enumerate() {
        // Numbered-label files name their key, so an existing one always
        // belongs to this entry. Code-named slots may have changed hands.
        let keep_curated = match &job.naming {
            AssetNaming::NumberedLabel => true,
            AssetNaming::Code(_) => {
                previous.same_owner(entry, descriptor.word_files.keys().copied())
            }
        };
        if !keep_curated && store.exists(&image_path(folder, &entry.asset_filename)) {
            log::info!(
                "{} now belongs to '{}'; replacing its previous image",
                entry.asset_filename,
                entry.key
            );
        }
        let keep_above = keep_curated.then_some(job.photo_threshold);
        let outcome = install_asset(store, folder, &entry.asset_filename, png, keep_above)?;
        if let InstallOutcome::KeptExisting { bytes, .. } = outcome {
            report.add(ReportEntry::KeptExisting {
                file: entry.asset_filename.clone(),
                bytes,
            });
        }
        ctx.progress.on_entry(i + 1, entries.len(), &entry.asset_filename);
    }

    ctx.progress.on_phase("Writing word lists");
    let summary = emit_category(
        store,
        &descriptor,
        &entries,
        &EmitOptions {
            write_mappings: job.write_mappings,
        },
    )?;

    ctx.progress.on_complete(&format!(
        "Built '{}': {} entries in {} languages",
        job.id,
        summary.entries,
        summary.word_lists.len()
    ));
    Ok(BuildOutcome {
        report,
        entries,
        emitted: Some(summary),
    })
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
