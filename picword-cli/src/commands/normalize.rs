use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use picword_core::Language;
use picword_lexicon::{TranslationOrigin, Translator, load_lexicon};

use crate::error::CliError;

/// Print the canonical key and per-language names for each label.
pub(crate) fn run_normalize(labels: &[String], language: Language, lexicon_path: &Path) -> Result<(), CliError> {
    let lexicon = load_lexicon(lexicon_path)?;
    let mut translator = Translator::new(&lexicon);

    for label in labels {
        let normalized = lexicon.normalize(label, language);
        let Some(key) = normalized.key else {
            log::warn!("  {} -> (nothing left after cleaning)", label);
            continue;
        };
        let unsettled = if normalized.settled { "" } else { " (unsettled)" };
        log::info!(
            "{} -> {}{}",
            label,
            key.as_str().if_supports_color(Stdout, |t| t.cyan()),
            unsettled.if_supports_color(Stdout, |t| t.red())
        );

        let native = normalized.native_root.as_deref().map(|root| (language, root));
        for &target in Language::all() {
            let translation = translator.translate(&key, target, native);
            let origin = match translation.origin {
                TranslationOrigin::Table => "",
                TranslationOrigin::Native => " (source label)",
                TranslationOrigin::Fallback => " (fallback)",
            };
            log::info!(
                "    {}: {}{}",
                target,
                translation.text,
                origin.if_supports_color(Stdout, |t| t.dimmed())
            );
        }
    }
    Ok(())
}
