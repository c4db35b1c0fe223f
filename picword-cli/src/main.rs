//! picword CLI
//!
//! Builds picture-word catalogs for the game runtime: crawl pages for
//! labelled images, merge image folders into numbered categories and check
//! what was emitted.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;
mod settings;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Crawl(args) => commands::crawl::run_crawl(args, quiet),
        Commands::Build {
            job,
            dry_run,
            report,
        } => {
            let root = settings::catalog_root(cli.root.as_deref())?;
            commands::build::run_build(&root, &job, dry_run, report.as_deref(), quiet)
        }
        Commands::Normalize {
            labels,
            lang,
            lexicon,
        } => commands::normalize::run_normalize(&labels, lang, &lexicon),
        Commands::Verify { category } => {
            let root = settings::catalog_root(cli.root.as_deref())?;
            commands::verify::run_verify(&root, &category)
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Show => {
                commands::config::run_config_show(cli.root.as_deref());
                Ok(())
            }
            ConfigAction::SetRoot { path } => commands::config::run_config_set_root(&path),
            ConfigAction::ClearRoot => commands::config::run_config_clear_root(),
        },
    }
}
