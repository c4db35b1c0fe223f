use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use picword_catalog::{FsStore, RegistryStatus};
use picword_core::Language;
use picword_import::{BuildOutcome, CategoryJob, RunContext, RunSummary, run_pipeline};

use crate::error::CliError;
use crate::progress::CliProgress;

/// Build one category from its job file into the catalog at `root`.
pub(crate) fn run_build(
    root: &Path,
    job_path: &Path,
    dry_run: bool,
    report_path: Option<&Path>,
    quiet: bool,
) -> Result<(), CliError> {
    let job = CategoryJob::load(job_path)?;
    let lexicon = job.load_lexicon()?;
    log::info!(
        "{} {} -> {}",
        "Building".if_supports_color(Stdout, |t| t.bold()),
        job.id.if_supports_color(Stdout, |t| t.cyan()),
        root.display()
    );

    let progress = CliProgress::new(quiet);
    let mut ctx = RunContext::new(&job, &lexicon, &progress).dry_run(dry_run);
    let mut store = FsStore::new(root);
    let outcome = run_pipeline(&mut ctx, &mut store)?;

    if dry_run {
        print_plan(&outcome);
    }
    print_summary(&outcome.report.summary(), &outcome);

    if let Some(path) = report_path {
        outcome.report.write_to_file(path)?;
        log::info!(
            "  Report: {}",
            path.display().if_supports_color(Stdout, |t| t.cyan())
        );
    }
    Ok(())
}

fn print_plan(outcome: &BuildOutcome) {
    log::info!("");
    log::info!("{}", "Planned entries:".if_supports_color(Stdout, |t| t.bold()));
    for entry in &outcome.entries {
        let names: Vec<String> = Language::all()
            .iter()
            .map(|lang| format!("{lang}: {}", entry.display_name(*lang)))
            .collect();
        log::info!(
            "  {:>4}  {:<24} {:<22} {}",
            entry.number,
            entry.key.as_str(),
            entry.asset_filename.if_supports_color(Stdout, |t| t.dimmed()),
            names.join(", ")
        );
    }
    log::info!("");
}

fn print_summary(summary: &RunSummary, outcome: &BuildOutcome) {
    let report = &outcome.report;
    let check = "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string();
    let warn = "?".if_supports_color(Stdout, |t| t.yellow()).to_string();

    log::info!(
        "  {} {} candidates scanned ({} files ignored)",
        check,
        summary.scanned,
        summary.ignored_files
    );
    if summary.invalid_labels > 0 {
        log::warn!("  {} {} labels normalized to nothing", warn, summary.invalid_labels);
    }
    if summary.fetch_failures + summary.decode_failures > 0 {
        log::warn!(
            "  {} {} images dropped ({} unreadable, {} undecodable)",
            warn,
            summary.fetch_failures + summary.decode_failures,
            summary.fetch_failures,
            summary.decode_failures
        );
    }
    if summary.collisions() > 0 {
        let by_tag: Vec<String> = summary
            .collisions_by_tag
            .iter()
            .map(|(tag, n)| format!("{n} {tag}"))
            .collect();
        log::info!(
            "  {} {} duplicates merged ({})",
            check,
            summary.collisions(),
            by_tag.join(", ")
        );
    }
    if summary.fallbacks() > 0 {
        let by_lang: Vec<String> = summary
            .fallbacks_by_language
            .iter()
            .map(|(lang, n)| format!("{n} {lang}"))
            .collect();
        log::warn!(
            "  {} {} names fell back to the key ({})",
            warn,
            summary.fallbacks(),
            by_lang.join(", ")
        );
    }
    if summary.kept_existing > 0 {
        log::info!(
            "  {} {} curated photos kept",
            check,
            summary.kept_existing
        );
    }

    match (&outcome.emitted, report.registry) {
        (Some(emitted), status) => {
            log::info!(
                "  {} {} entries written to {} word lists",
                check,
                emitted.entries,
                emitted.word_lists.len()
            );
            if status == Some(RegistryStatus::New) {
                log::info!("  {} Category '{}' registered", check, report.category);
            }
        }
        (None, _) => {
            log::info!(
                "  {} Dry run: {} entries planned, nothing written",
                check,
                outcome.entries.len()
            );
        }
    }
}
