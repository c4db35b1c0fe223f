use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::settings::{self, Settings};

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", Settings::path().display());
}

/// Show the settings file and the catalog root that would be used.
pub(crate) fn run_config_show(root_override: Option<&Path>) {
    let path = Settings::path();
    log::info!(
        "{}",
        "picword settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let settings = Settings::load(&path).unwrap_or_else(|e| {
        log::warn!("  {e}");
        Settings::default()
    });
    let (root, source) = settings.resolve_root(root_override);
    log::info!(
        "  Catalog root:  {} {}",
        root.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({})", source.describe()).if_supports_color(Stdout, |t| t.dimmed()),
    );

    if let Ok(contents) = std::fs::read_to_string(&path) {
        log::info!("");
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }
}

/// Save the default catalog root.
pub(crate) fn run_config_set_root(root: &Path) -> Result<(), CliError> {
    if !root.is_dir() {
        return Err(CliError::config(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    let absolute = std::fs::canonicalize(root)?;
    settings::save_catalog_root(&Settings::path(), Some(&absolute))?;
    log::info!(
        "{} Catalog root set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        absolute.display()
    );
    Ok(())
}

/// Forget the saved catalog root.
pub(crate) fn run_config_clear_root() -> Result<(), CliError> {
    settings::save_catalog_root(&Settings::path(), None)?;
    log::info!(
        "{} Catalog root cleared",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}
