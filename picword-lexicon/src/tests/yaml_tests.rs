use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn loads_single_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("lexicon.yaml");
    fs::write(
        &path,
        "languages:\n  ru:\n    aliases:\n      волк: wolf\ntranslations:\n  wolf:\n    ru: Волк\n",
    )
    .unwrap();

    let lexicon = load_lexicon(&path).unwrap();
    assert_eq!(lexicon.key_language(), Language::En);
    assert_eq!(lexicon.translations().get("wolf", Language::Ru), Some("Волк"));
    assert_eq!(
        lexicon.normalize("волк", Language::Ru).key.unwrap().as_str(),
        "wolf"
    );
}

#[test]
fn directory_files_merge_in_name_order() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("10-base.yaml"),
        "languages:\n  en:\n    stop_words: [photo]\n    aliases:\n      grey_wolf: wolf\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("20-override.yml"),
        "languages:\n  en:\n    stop_words: [image]\n    aliases:\n      grey_wolf: gray_wolf\n",
    )
    .unwrap();
    fs::write(tmp.path().join("notes.txt"), "not yaml: [").unwrap();
    fs::write(tmp.path().join("00-empty.yaml"), "").unwrap();

    let lexicon = load_lexicon(tmp.path()).unwrap();
    let profile = lexicon.profile(Language::En);
    assert_eq!(profile.stop_phrases.len(), 2);
    assert_eq!(
        lexicon
            .normalize("grey_wolf_photo_image.jpg", Language::En)
            .key
            .unwrap()
            .as_str(),
        "gray_wolf"
    );
}

#[test]
fn stop_phrases_sorted_longest_first_and_deduplicated() {
    let lexicon = parse_lexicon(
        "languages:\n  ru:\n    stop_words: [охота, удачная охота, охота, на_охоте]\n",
        "inline",
    )
    .unwrap();
    let phrases = &lexicon.profile(Language::Ru).stop_phrases;
    assert_eq!(phrases.len(), 3);
    assert_eq!(phrases[0].len(), 2);
    assert_eq!(phrases[2], vec!["охота".to_string()]);
}

#[test]
fn missing_path_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = load_lexicon(&tmp.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, LexiconError::NotFound(_)));
}

#[test]
fn parse_error_names_the_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.yaml");
    fs::write(&path, "languages: [oops").unwrap();
    match load_lexicon(&path).unwrap_err() {
        LexiconError::Parse { path: p, .. } => assert!(p.ends_with("bad.yaml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_language_code_is_a_parse_error() {
    let err = parse_lexicon("languages:\n  de:\n    stop_words: [foto]\n", "inline").unwrap_err();
    assert!(matches!(err, LexiconError::Parse { .. }));
}

#[test]
fn empty_rule_is_rejected() {
    let err = parse_lexicon(
        "languages:\n  ru:\n    rules:\n      - { when: [акула], then: акула }\n      - { when: [], then: x }\n",
        "inline",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        LexiconError::InvalidRule {
            language: Language::Ru,
            index: 1
        }
    ));
}

#[test]
fn alias_to_a_stop_word_is_unstable() {
    // "photo" cleans to nothing, so the alias target never yields a key.
    let err = parse_lexicon(
        "languages:\n  en:\n    stop_words: [photo]\n    aliases:\n      pic: photo\n",
        "inline",
    )
    .unwrap_err();
    assert!(matches!(err, LexiconError::UnstableRule { .. }));
}

#[test]
fn cyclic_aliases_are_unstable() {
    let err = parse_lexicon(
        "languages:\n  en:\n    aliases:\n      cat: kitty\n      kitty: cat\n",
        "inline",
    )
    .unwrap_err();
    assert!(matches!(err, LexiconError::UnstableRule { .. }));
}
