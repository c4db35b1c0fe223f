//! Category builds: read source folders, normalize and merge their
//! candidates, and write the numbered, translated catalog.
//!
//! This crate owns the pipeline. The per-concern logic lives in the other
//! workspace crates: normalization and translation in `picword-lexicon`,
//! image preparation in `picword-scraper`, catalog files in
//! `picword-catalog`.

pub mod error;
pub mod install;
pub mod job;
pub mod merge;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod sources;

pub use error::ImportError;
pub use install::{AssetProblem, InstallOutcome, PreviousSlots};
pub use job::{CategoryJob, SourceSpec, ThumbnailConfig};
pub use merge::{Collision, InvalidLabel, MergeOutcome, MergedEntry, merge};
pub use pipeline::{BuildOutcome, RunContext, build_category, run_pipeline, scan_sources};
pub use progress::{ImportProgress, SilentProgress};
pub use report::{ReportEntry, RunReport, RunSummary};
pub use sources::{SourceBatch, scan_source};
