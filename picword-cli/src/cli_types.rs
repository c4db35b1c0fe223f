//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use picword_core::Language;

#[derive(Parser)]
#[command(name = "picword")]
#[command(about = "Build picture-word catalogs from image folders and web pages", long_about = None)]
pub(crate) struct Cli {
    /// Catalog root containing data/ (defaults to the saved root, then the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for crawling a site for labelled images.
#[derive(Args, Clone)]
pub(crate) struct CrawlArgs {
    /// Start page URL(s)
    #[arg(required = true)]
    pub start_urls: Vec<String>,

    /// Folder to save thumbnails into
    #[arg(short, long)]
    pub out: PathBuf,

    /// Maximum link depth from the start pages
    #[arg(short, long, default_value_t = picword_scraper::crawler::DEFAULT_MAX_DEPTH)]
    pub depth: u32,

    /// Only follow links whose URL matches this regex
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Stop after fetching this many pages
    #[arg(long, default_value_t = picword_scraper::crawler::DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Stop after this many seconds
    #[arg(long)]
    pub time_budget: Option<u64>,

    /// Minimum delay between requests in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Thumbnail size as WIDTHxHEIGHT
    #[arg(long, default_value = "300x300", value_parser = parse_size)]
    pub size: (u32, u32),

    /// Never replace existing files larger than this many bytes
    #[arg(long, default_value_t = picword_scraper::asset::DEFAULT_PHOTO_THRESHOLD)]
    pub threshold: u64,

    /// Disable crawl log file
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Crawl pages for labelled images and save them as thumbnails
    Crawl(CrawlArgs),

    /// Build a category from a job file
    Build {
        /// Category job file (TOML)
        job: PathBuf,

        /// Show the numbered plan without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Write a build report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show the canonical key and translations for labels
    Normalize {
        /// Labels or file names to normalize
        #[arg(required = true)]
        labels: Vec<String>,

        /// Language the labels are written in (e.g., ru, en, spanish)
        #[arg(short, long)]
        lang: Language,

        /// Lexicon file or directory
        #[arg(long, default_value = "lexicon")]
        lexicon: PathBuf,
    },

    /// Check a registered category's word lists and images
    Verify {
        /// Category id
        category: String,
    },

    /// Manage saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Show current settings
    Show,

    /// Save the default catalog root
    SetRoot {
        /// Catalog root directory
        path: PathBuf,
    },

    /// Forget the saved catalog root
    ClearRoot,
}

/// Parse `WIDTHxHEIGHT`.
pub(crate) fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let parse = |v: &str| -> Result<u32, String> {
        match v.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("invalid dimension '{v}'")),
        }
    };
    Ok((parse(w)?, parse(h)?))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn size_parsing() {
        assert_eq!(parse_size("300x300"), Ok((300, 300)));
        assert_eq!(parse_size("640X480"), Ok((640, 480)));
        assert!(parse_size("300").is_err());
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn crawl_arguments() {
        let cli = Cli::try_parse_from([
            "picword",
            "crawl",
            "https://example.org/animals",
            "--out",
            "staging",
            "--depth",
            "2",
            "--size",
            "128x96",
        ])
        .unwrap();
        let Commands::Crawl(args) = cli.command else {
            panic!("expected crawl");
        };
        assert_eq!(args.start_urls, ["https://example.org/animals"]);
        assert_eq!(args.depth, 2);
        assert_eq!(args.size, (128, 96));
        assert_eq!(args.max_pages, 200);
        assert!(!args.no_log);
    }

    #[test]
    fn normalize_accepts_language_aliases() {
        let cli = Cli::try_parse_from(["picword", "normalize", "лисица.jpg", "--lang", "russian"]).unwrap();
        let Commands::Normalize { lang, labels, .. } = cli.command else {
            panic!("expected normalize");
        };
        assert_eq!(lang, Language::Ru);
        assert_eq!(labels, ["лисица.jpg"]);
    }
}
