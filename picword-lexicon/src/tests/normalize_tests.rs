use super::*;
use crate::yaml::parse_lexicon;

const LEXICON: &str = r#"
key_language: en
languages:
  ru:
    stop_words: [фото, рыба, на охоте, дикая]
    rules:
      - { when: [акула], then: акула }
      - { when: [акула, бычья], then: бычья_акула }
      - { when: [меч], then: рыба_меч }
    aliases:
      лисица: fox
      бычья_акула: bull_shark
      рыба_меч: swordfish
  en:
    stop_words: [photo, in the wild]
    aliases:
      foxes: fox
"#;

fn lexicon() -> Lexicon {
    parse_lexicon(LEXICON, "inline").unwrap()
}

fn key(lexicon: &Lexicon, raw: &str, language: Language) -> Option<String> {
    lexicon
        .normalize(raw, language)
        .key
        .map(|k| k.as_str().to_string())
}

#[test]
fn canonical_form_collapses_separators() {
    assert_eq!(canonical_form("  Grey--Wolf (Canis) "), "grey_wolf_canis");
    assert_eq!(canonical_form("d'Artagnan"), "dartagnan");
    assert_eq!(canonical_form("___"), "");
    assert_eq!(canonical_form("Лисица.Обыкновенная"), "лисица_обыкновенная");
}

#[test]
fn strips_path_and_image_extension() {
    let lex = lexicon();
    assert_eq!(key(&lex, "photos/en/fox_photo.jpg", Language::En).as_deref(), Some("fox"));
    assert_eq!(key(&lex, r"C:\pics\Foxes.PNG", Language::En).as_deref(), Some("fox"));
    // Non-image extensions are part of the label.
    assert_eq!(key(&lex, "fox.txt", Language::En).as_deref(), Some("fox_txt"));
}

#[test]
fn multi_word_stop_phrases_are_removed_whole() {
    let lex = lexicon();
    assert_eq!(
        key(&lex, "wolf_in_the_wild.jpg", Language::En).as_deref(),
        Some("wolf")
    );
    // "in" alone is not a stop word.
    assert_eq!(key(&lex, "wolf_in_snow", Language::En).as_deref(), Some("wolf_in_snow"));
}

#[test]
fn russian_label_goes_through_rules_and_aliases() {
    let lex = lexicon();
    assert_eq!(key(&lex, "лисица_фото.jpg", Language::Ru).as_deref(), Some("fox"));
    assert_eq!(
        key(&lex, "Бычья акула на охоте.jpeg", Language::Ru).as_deref(),
        Some("bull_shark")
    );
    // Stop word "рыба" is removed, then the rule puts it back and the alias maps it.
    assert_eq!(key(&lex, "рыба меч", Language::Ru).as_deref(), Some("swordfish"));
}

#[test]
fn unknown_russian_root_is_transliterated() {
    let lex = lexicon();
    let normalized = lex.normalize("дикая_выдра.jpg", Language::Ru);
    assert_eq!(normalized.key.unwrap().as_str(), "vydra");
    assert_eq!(normalized.native_root.as_deref(), Some("выдра"));
    assert!(normalized.settled);
}

#[test]
fn label_of_only_stop_words_has_no_key() {
    let lex = lexicon();
    let normalized = lex.normalize("фото.jpg", Language::Ru);
    assert_eq!(normalized.key, None);
    assert_eq!(normalized.native_root, None);
    assert_eq!(key(&lex, "!!!.png", Language::En), None);
}

#[test]
fn normalizing_a_key_is_a_no_op() {
    let lex = lexicon();
    for (raw, language) in [
        ("лисица_фото.jpg", Language::Ru),
        ("Бычья акула", Language::Ru),
        ("дикая_выдра", Language::Ru),
        ("fox_photo.jpg", Language::En),
        ("Great White Shark", Language::Es),
    ] {
        let once = key(&lex, raw, language).unwrap();
        let twice = key(&lex, &once, language).unwrap();
        assert_eq!(once, twice, "{raw}");
    }
}

#[test]
fn normalize_entry_fills_key_and_root() {
    let lex = lexicon();
    let mut entry = CandidateEntry::new(
        "лисица_фото.jpg",
        picword_core::SourceTag::Secondary,
        Language::Ru,
        picword_core::AssetRef::Local("ru/лисица_фото.jpg".into()),
    );
    assert!(lex.normalize_entry(&mut entry));
    assert_eq!(entry.canonical_key.unwrap().as_str(), "fox");
    assert_eq!(entry.native_root.as_deref(), Some("лисица"));

    let mut empty = CandidateEntry::new(
        "фото.png",
        picword_core::SourceTag::Secondary,
        Language::Ru,
        picword_core::AssetRef::Local("ru/фото.png".into()),
    );
    assert!(!lex.normalize_entry(&mut empty));
}

#[test]
fn empty_lexicon_still_normalizes() {
    let lex = Lexicon::empty();
    assert_eq!(key(&lex, "Red Panda.webp", Language::En).as_deref(), Some("red_panda"));
    assert_eq!(key(&lex, "Красная панда", Language::Ru).as_deref(), Some("krasnaya_panda"));
}
