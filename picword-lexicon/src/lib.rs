//! Lexicon-driven label normalization and translation.
//!
//! A [`Lexicon`] bundles per-language stop words, disambiguation rules and
//! alias tables with a static translation table. It is loaded from YAML
//! (see [`yaml::load_lexicon`]) and validated on load.

pub mod model;
pub mod normalize;
pub mod rules;
pub mod translate;
pub mod translit;
pub mod yaml;

pub use model::{LanguageProfile, Lexicon, LexiconFile, TranslationTable};
pub use normalize::{Normalized, canonical_form};
pub use translate::{Translation, TranslationOrigin, Translator};
pub use yaml::{LexiconError, load_lexicon, parse_lexicon};
