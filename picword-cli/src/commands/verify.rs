use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use picword_catalog::{FsStore, verify_category};

use crate::error::CliError;

/// Check a registered category's word lists and images.
pub(crate) fn run_verify(root: &Path, category: &str) -> Result<(), CliError> {
    let store = FsStore::new(root);
    let report = verify_category(&store, category)?;

    log::info!(
        "{} {}",
        "Verifying".if_supports_color(Stdout, |t| t.bold()),
        category.if_supports_color(Stdout, |t| t.cyan())
    );
    for (language, count) in &report.counts {
        log::info!("  {}: {} entries", language, count);
    }
    log::info!("  {} images referenced", report.assets_checked);

    if report.is_ok() {
        log::info!(
            "  {} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            "All checks passed"
        );
        return Ok(());
    }

    for problem in &report.problems {
        log::error!(
            "  {} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            problem
        );
    }
    Err(CliError::verify(format!(
        "{} problem(s) in '{}'",
        report.problems.len(),
        category
    )))
}
