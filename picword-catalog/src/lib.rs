//! Catalog output for the picword game runtime.
//!
//! Everything is written through a [`CatalogStore`] rooted at the catalog
//! directory:
//!
//! - `data/words/<lang>/<file>`: numbered word lists
//! - `data/images/<folder>/`: thumbnails
//! - `data/image_mappings/<category>_<lang>.json`: optional number-to-image index
//! - `data/config/categories.json`: the shared category registry

pub mod emitter;
pub mod error;
pub mod layout;
pub mod mappings;
pub mod registry;
pub mod store;
pub mod types;
pub mod verify;

pub use emitter::{EmitOptions, EmitSummary, emit_category, read_word_list, render_word_list};
pub use error::CatalogError;
pub use registry::{Registry, RegistryStatus};
pub use store::{CatalogStore, FsStore, MemoryStore};
pub use types::{AssetNaming, CatalogEntry, CategoryDescriptor};
pub use verify::{VerifyProblem, VerifyReport, verify_category};
