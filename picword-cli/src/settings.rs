//! Saved CLI settings, kept in `~/.config/picword/settings.toml`:
//!
//! ```toml
//! [catalog]
//! root = "/path/to/game"
//! ```
//!
//! Saving the root rewrites only `catalog.root`; other tables in the file
//! are carried over as they are.

use std::io;
use std::path::{Path, PathBuf};

use picword_catalog::{CatalogStore, FsStore};
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CatalogSettings {
    /// Game data folder used when `--root` is not given.
    pub root: Option<PathBuf>,
}

/// Where the catalog root for a command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootSource {
    Flag,
    Saved,
    WorkingDir,
}

impl RootSource {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            RootSource::Flag => "--root",
            RootSource::Saved => "settings",
            RootSource::WorkingDir => "current directory",
        }
    }
}

impl Settings {
    pub(crate) fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("picword")
            .join("settings.toml")
    }

    /// Read the settings file. A missing file gives the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text)
                .map_err(|e| CliError::config(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn catalog_root(&self) -> Option<&Path> {
        self.catalog
            .root
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// `--root` first, then the saved root, then the working directory.
    pub(crate) fn resolve_root(&self, flag: Option<&Path>) -> (PathBuf, RootSource) {
        if let Some(p) = flag {
            return (p.to_path_buf(), RootSource::Flag);
        }
        if let Some(p) = self.catalog_root() {
            return (p.to_path_buf(), RootSource::Saved);
        }
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        (cwd, RootSource::WorkingDir)
    }
}

/// Catalog root for a command that reads or writes the catalog.
pub(crate) fn catalog_root(flag: Option<&Path>) -> Result<PathBuf, CliError> {
    let (root, source) = Settings::load(&Settings::path())?.resolve_root(flag);
    log::debug!("Catalog root {} ({})", root.display(), source.describe());
    Ok(root)
}

/// Set or remove `catalog.root` in the settings file at `path`.
///
/// The file is edited as a TOML table rather than through [`Settings`] so
/// keys this version does not know about survive. A file that does not
/// parse is left alone.
pub(crate) fn save_catalog_root(path: &Path, root: Option<&Path>) -> Result<(), CliError> {
    let mut doc = match std::fs::read_to_string(path) {
        Ok(text) => text
            .parse::<toml::Table>()
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => toml::Table::new(),
        Err(e) => return Err(e.into()),
    };

    let catalog = doc
        .entry("catalog")
        .or_insert_with(|| toml::Table::new().into());
    let toml::Value::Table(catalog) = catalog else {
        return Err(CliError::config(format!(
            "{}: [catalog] is not a table",
            path.display()
        )));
    };
    match root {
        Some(p) => {
            catalog.insert("root".into(), p.to_string_lossy().into_owned().into());
        }
        None => {
            catalog.remove("root");
        }
    }

    let (Some(dir), Some(name)) = (path.parent(), path.file_name()) else {
        return Err(CliError::config(format!(
            "{} is not a file path",
            path.display()
        )));
    };
    let text = toml::to_string_pretty(&doc).map_err(|e| CliError::config(e.to_string()))?;
    FsStore::new(dir).write(Path::new(name), text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings.catalog_root(), None);
    }

    #[test]
    fn parses_catalog_root_and_ignores_unknown_tables() {
        let settings: Settings =
            toml::from_str("[catalog]\nroot = \"/srv/game\"\n\n[crawl]\ndelay_ms = 1500\n")
                .unwrap();
        assert_eq!(settings.catalog_root(), Some(Path::new("/srv/game")));

        let empty: Settings = toml::from_str("[catalog]\nroot = \"\"\n").unwrap();
        assert_eq!(empty.catalog_root(), None);
    }

    #[test]
    fn set_and_clear_root_keeps_other_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picword").join("settings.toml");

        save_catalog_root(&path, Some(Path::new("/srv/game"))).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.catalog_root(), Some(Path::new("/srv/game")));

        let mut text = std::fs::read_to_string(&path).unwrap();
        text.push_str("\n[crawl]\ndelay_ms = 1500\n");
        std::fs::write(&path, text).unwrap();

        save_catalog_root(&path, None).unwrap();
        assert_eq!(Settings::load(&path).unwrap().catalog_root(), None);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("delay_ms = 1500"));
        assert!(!path.with_file_name("settings.toml.tmp").exists());
    }

    #[test]
    fn unreadable_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[catalog\nroot = ").unwrap();

        assert!(matches!(Settings::load(&path), Err(CliError::Config(_))));
        assert!(save_catalog_root(&path, Some(Path::new("/srv/game"))).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[catalog\nroot = ");
    }

    #[test]
    fn flag_wins_over_saved_root() {
        let settings: Settings = toml::from_str("[catalog]\nroot = \"/srv/game\"\n").unwrap();
        assert_eq!(
            settings.resolve_root(Some(Path::new("/tmp/catalog"))),
            (PathBuf::from("/tmp/catalog"), RootSource::Flag)
        );
        assert_eq!(
            settings.resolve_root(None),
            (PathBuf::from("/srv/game"), RootSource::Saved)
        );
        assert_eq!(
            Settings::default().resolve_root(None).1,
            RootSource::WorkingDir
        );
    }
}
