use std::path::PathBuf;

use picword_core::{AssetRef, Language};
use proptest::prelude::*;

use super::*;

fn candidate(label: &str, key: Option<&str>, tag: SourceTag) -> CandidateEntry {
    let mut entry = CandidateEntry::new(
        label,
        tag,
        Language::En,
        AssetRef::Local(PathBuf::from(label)),
    );
    entry.canonical_key = key.and_then(CanonicalKey::new);
    entry
}

fn keys(outcome: &MergeOutcome) -> Vec<&str> {
    outcome.entries.iter().map(|e| e.key.as_str()).collect()
}

#[test]
fn primary_beats_secondary_regardless_of_list_order() {
    let secondary = vec![
        candidate("лисица_фото.jpg", Some("fox"), SourceTag::Secondary),
        candidate("волк.jpg", Some("wolf"), SourceTag::Secondary),
    ];
    let primary = vec![candidate("fox_photo.jpg", Some("fox"), SourceTag::Primary)];

    let outcome = merge(vec![secondary, primary]);
    assert_eq!(keys(&outcome), ["fox", "wolf"]);
    assert_eq!(outcome.entries[0].candidate.raw_label, "fox_photo.jpg");
    assert_eq!(
        outcome.collisions,
        [Collision {
            key: CanonicalKey::new("fox").unwrap(),
            kept_tag: SourceTag::Primary,
            kept_label: "fox_photo.jpg".into(),
            dropped_tag: SourceTag::Secondary,
            dropped_label: "лисица_фото.jpg".into(),
        }]
    );
    assert_eq!(outcome.collisions_by_tag(), BTreeMap::from([(SourceTag::Secondary, 1)]));
}

#[test]
fn within_a_source_the_smallest_label_wins() {
    let list = vec![
        candidate("fox_wild.jpg", Some("fox"), SourceTag::Primary),
        candidate("fox.jpg", Some("fox"), SourceTag::Primary),
    ];
    let outcome = merge(vec![list]);
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].candidate.raw_label, "fox.jpg");
    assert_eq!(outcome.collisions[0].dropped_label, "fox_wild.jpg");
    assert_eq!(outcome.collisions_by_tag()[&SourceTag::Primary], 1);
}

#[test]
fn equal_tags_keep_job_order() {
    let first = vec![candidate("b.jpg", Some("bear"), SourceTag::Secondary)];
    let second = vec![candidate("a.jpg", Some("bear"), SourceTag::Secondary)];
    let outcome = merge(vec![first, second]);
    assert_eq!(outcome.entries[0].candidate.raw_label, "b.jpg");
}

#[test]
fn keyless_entries_are_counted_not_merged() {
    let list = vec![
        candidate("фото.jpg", None, SourceTag::Crawled),
        candidate("owl.jpg", Some("owl"), SourceTag::Crawled),
    ];
    let outcome = merge(vec![list]);
    assert_eq!(keys(&outcome), ["owl"]);
    assert_eq!(
        outcome.invalid,
        [InvalidLabel {
            tag: SourceTag::Crawled,
            label: "фото.jpg".into()
        }]
    );
    assert!(outcome.collisions.is_empty());
}

#[test]
fn native_roots_are_gathered_from_dropped_candidates() {
    let mut fox = candidate("fox_photo.jpg", Some("fox"), SourceTag::Primary);
    fox.native_root = Some("fox".into());
    let mut lisa = candidate("лиса.jpg", Some("fox"), SourceTag::Secondary);
    lisa.language = Language::Ru;
    lisa.native_root = Some("лиса".into());
    let mut lisitsa = candidate("лисица.jpg", Some("fox"), SourceTag::Secondary);
    lisitsa.language = Language::Ru;
    lisitsa.native_root = Some("лисица".into());

    let outcome = merge(vec![vec![lisitsa, lisa], vec![fox]]);
    let entry = &outcome.entries[0];
    assert_eq!(entry.native_for(Language::En), Some((Language::En, "fox")));
    // "лиса.jpg" sorts first within its source.
    assert_eq!(entry.native_for(Language::Ru), Some((Language::Ru, "лиса")));
    assert_eq!(entry.native_for(Language::Es), None);
}

#[test]
fn empty_input() {
    let outcome = merge(Vec::new());
    assert!(outcome.entries.is_empty());
    assert!(outcome.collisions_by_tag().is_empty());
}

fn arb_list(tag: SourceTag) -> impl Strategy<Value = Vec<CandidateEntry>> {
    prop::collection::vec(("[a-e]{1,2}", 0u8..4), 0..12).prop_map(move |items| {
        items
            .into_iter()
            .map(|(key, variant)| {
                let label = format!("{key}_{variant}.jpg");
                candidate(&label, Some(key.as_str()), tag)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn merge_is_independent_of_order_within_sources(
        primary in arb_list(SourceTag::Primary),
        crawled in arb_list(SourceTag::Crawled),
        seed in any::<u64>(),
    ) {
        let shuffle = |list: &Vec<CandidateEntry>| {
            let mut shuffled = list.clone();
            // Deterministic rotation plus reversal driven by the seed.
            if !shuffled.is_empty() {
                let by = (seed as usize) % shuffled.len();
                shuffled.rotate_left(by);
            }
            if seed % 2 == 1 {
                shuffled.reverse();
            }
            shuffled
        };

        let a = merge(vec![primary.clone(), crawled.clone()]);
        let b = merge(vec![shuffle(&crawled), shuffle(&primary)]);

        let labels = |o: &MergeOutcome| o.entries.iter().map(|e| e.candidate.raw_label.clone()).collect::<Vec<_>>();
        prop_assert_eq!(labels(&a), labels(&b));
        prop_assert_eq!(a.collisions_by_tag(), b.collisions_by_tag());

        // Output is sorted and unique.
        let ks = keys(&a);
        prop_assert!(ks.windows(2).all(|w| w[0] < w[1]));

        // Every key a primary candidate had is won by a primary candidate.
        for entry in &a.entries {
            if primary.iter().any(|p| p.canonical_key.as_ref() == Some(&entry.key)) {
                prop_assert_eq!(entry.candidate.source_tag, SourceTag::Primary);
            }
        }
    }
}
