//! Source-priority deduplication.
//!
//! Sources are merged in priority order (primary, then secondary, then
//! crawled; ties keep job order). Inside one source, candidates are sorted by
//! `(canonical key, raw label)` first so the winner of a key never depends on
//! directory listing order. The first candidate for a key wins and every
//! later one is recorded as a [`Collision`].

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use picword_core::{CandidateEntry, CanonicalKey, Language, SourceTag};

/// A candidate dropped because an earlier one already claimed its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub key: CanonicalKey,
    pub kept_tag: SourceTag,
    pub kept_label: String,
    pub dropped_tag: SourceTag,
    pub dropped_label: String,
}

/// A candidate whose label normalized to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLabel {
    pub tag: SourceTag,
    pub label: String,
}

/// The winning candidate for one canonical key.
#[derive(Debug, Clone)]
pub struct MergedEntry {
    pub key: CanonicalKey,
    pub candidate: CandidateEntry,
    /// First native root seen per source language, over every candidate
    /// that normalized to this key (winner included).
    pub natives: BTreeMap<Language, String>,
}

impl MergedEntry {
    /// `(language, root)` for translating into `language`, if some source
    /// named this subject in it.
    pub fn native_for(&self, language: Language) -> Option<(Language, &str)> {
        self.natives.get(&language).map(|root| (language, root.as_str()))
    }
}

#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// Unique entries, sorted by canonical key.
    pub entries: Vec<MergedEntry>,
    pub collisions: Vec<Collision>,
    pub invalid: Vec<InvalidLabel>,
}

impl MergeOutcome {
    /// Collisions counted by the source that lost.
    pub fn collisions_by_tag(&self) -> BTreeMap<SourceTag, usize> {
        let mut counts = BTreeMap::new();
        for c in &self.collisions {
            *counts.entry(c.dropped_tag).or_insert(0) += 1;
        }
        counts
    }
}

/// Merge normalized candidate lists, one list per source.
///
/// Each list is ranked by the best (lowest) priority tag it contains.
pub fn merge(sources: Vec<Vec<CandidateEntry>>) -> MergeOutcome {
    let mut ranked: Vec<(u8, Vec<CandidateEntry>)> = sources
        .into_iter()
        .map(|list| {
            let rank = list
                .iter()
                .map(|e| e.source_tag.priority())
                .min()
                .unwrap_or(u8::MAX);
            (rank, list)
        })
        .collect();
    // Stable: equal tags keep their given order.
    ranked.sort_by_key(|(rank, _)| *rank);

    let mut winners: BTreeMap<CanonicalKey, MergedEntry> = BTreeMap::new();
    let mut outcome = MergeOutcome::default();

    for (_, mut list) in ranked {
        list.sort_by(|a, b| {
            (&a.canonical_key, &a.raw_label).cmp(&(&b.canonical_key, &b.raw_label))
        });

        for candidate in list {
            let Some(key) = candidate.canonical_key.clone() else {
                log::warn!(
                    "Label '{}' ({}) normalized to nothing; skipped",
                    candidate.raw_label,
                    candidate.source_tag
                );
                outcome.invalid.push(InvalidLabel {
                    tag: candidate.source_tag,
                    label: candidate.raw_label,
                });
                continue;
            };

            match winners.entry(key) {
                Entry::Vacant(slot) => {
                    let mut natives = BTreeMap::new();
                    if let Some(root) = &candidate.native_root {
                        natives.insert(candidate.language, root.clone());
                    }
                    let key = slot.key().clone();
                    slot.insert(MergedEntry {
                        key,
                        candidate,
                        natives,
                    });
                }
                Entry::Occupied(mut slot) => {
                    let merged = slot.get_mut();
                    if let Some(root) = &candidate.native_root {
                        merged
                            .natives
                            .entry(candidate.language)
                            .or_insert_with(|| root.clone());
                    }
                    let kept = &merged.candidate;
                    log::debug!(
                        "Duplicate '{}': kept {} '{}', dropped {} '{}'",
                        merged.key,
                        kept.source_tag,
                        kept.raw_label,
                        candidate.source_tag,
                        candidate.raw_label
                    );
                    outcome.collisions.push(Collision {
                        key: merged.key.clone(),
                        kept_tag: kept.source_tag,
                        kept_label: kept.raw_label.clone(),
                        dropped_tag: candidate.source_tag,
                        dropped_label: candidate.raw_label,
                    });
                }
            }
        }
    }

    outcome.entries = winners.into_values().collect();
    outcome
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
