use std::path::Path;

use super::*;

const FULL: &str = r#"
id = "animal_world"
lexicon = "lexicon"
naming = { code = "ANIMAL" }
thumbnail = { width = 256, height = 192 }
photo_threshold = 40000
write_mappings = true

[names]
ru = "Животный мир"
en = "Animal World"

[description]
en = "Discover amazing animals"

[[sources]]
path = "animals_en"
tag = "primary"
language = "en"
exclude = ["parse_"]

[[sources]]
path = "/abs/animals_ru"
tag = "secondary"
language = "russian"
"#;

fn parse(text: &str) -> Result<CategoryJob, ImportError> {
    CategoryJob::parse(text, Path::new("jobs/animal_world.toml"), Path::new("jobs"))
}

#[test]
fn parses_full_job_and_resolves_paths() {
    let job = parse(FULL).unwrap();
    assert_eq!(job.id, "animal_world");
    assert_eq!(job.lexicon, Path::new("jobs/lexicon"));
    assert_eq!(job.naming, AssetNaming::Code("ANIMAL".into()));
    assert_eq!(job.thumbnail_spec(), ThumbnailSpec { width: 256, height: 192 });
    assert_eq!(job.photo_threshold, 40_000);
    assert!(job.write_mappings);

    assert_eq!(job.sources.len(), 2);
    assert_eq!(job.sources[0].path, Path::new("jobs/animals_en"));
    assert_eq!(job.sources[0].tag, SourceTag::Primary);
    assert_eq!(job.sources[0].exclude, ["parse_"]);
    assert_eq!(job.sources[1].path, Path::new("/abs/animals_ru"));
    assert_eq!(job.sources[1].language, Language::Ru);
    assert!(job.sources[1].exclude.is_empty());
}

#[test]
fn defaults_apply() {
    let job = parse(
        r#"
id = "dinosaurs"
lexicon = "lex.yaml"

[[sources]]
path = "dino"
tag = "crawled"
language = "en"
"#,
    )
    .unwrap();
    assert_eq!(job.naming, AssetNaming::NumberedLabel);
    assert_eq!(job.thumbnail_spec(), ThumbnailSpec::default());
    assert_eq!(job.photo_threshold, 50_000);
    assert!(!job.write_mappings);
    assert_eq!(job.word_file(), "dinosaurs.txt");
    assert_eq!(job.image_folder(), "dinosaurs");
}

#[test]
fn descriptor_carries_names_and_word_files() {
    let job = parse(FULL).unwrap();
    let descriptor = job.descriptor();
    assert_eq!(descriptor.id, "animal_world");
    assert_eq!(descriptor.image_folder, "animal_world");
    assert_eq!(descriptor.names[&Language::Ru], "Животный мир");
    assert_eq!(descriptor.description[&Language::En], "Discover amazing animals");
    assert_eq!(descriptor.word_files.len(), Language::all().len());
    assert!(descriptor.word_files.values().all(|f| f == "animal_world.txt"));
}

#[test]
fn numbered_label_naming_parses_from_string() {
    let job = parse(&FULL.replace(r#"naming = { code = "ANIMAL" }"#, r#"naming = "numbered-label""#)).unwrap();
    assert_eq!(job.naming, AssetNaming::NumberedLabel);
}

#[test]
fn invalid_jobs_are_rejected() {
    assert!(matches!(
        parse(&FULL.replace("animal_world", "Animal World")),
        Err(ImportError::Job { .. })
    ));
    assert!(matches!(
        parse(&FULL.replace("tag = \"primary\"", "tag = \"best\"")),
        Err(ImportError::JobParse { .. })
    ));
    assert!(matches!(
        parse(&FULL.replace("width = 256", "width = 0")),
        Err(ImportError::Job { .. })
    ));
    assert!(matches!(
        parse(&format!("word_file = \"../escape.txt\"\n{FULL}")),
        Err(ImportError::Job { .. })
    ));
    assert!(matches!(
        parse("id = \"x\"\nlexicon = \"l\"\nsources = []\n"),
        Err(ImportError::Job { .. })
    ));
    assert!(matches!(
        parse(&format!("colour = \"red\"\n{FULL}")),
        Err(ImportError::JobParse { .. })
    ));
}

#[test]
fn load_reads_relative_to_job_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("animal_world.toml");
    std::fs::write(&path, FULL).unwrap();

    let job = CategoryJob::load(&path).unwrap();
    assert_eq!(job.lexicon, dir.path().join("lexicon"));
    assert_eq!(job.sources[0].path, dir.path().join("animals_en"));

    assert!(matches!(
        CategoryJob::load(&dir.path().join("missing.toml")),
        Err(ImportError::JobIo { .. })
    ));
}
