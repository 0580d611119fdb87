use std::fs;

use onyx_filter::assets::{
    lexicon_path, load_lexicon, matches_embedded, write_default_lexicon, LexiconOrigin,
    LEXICON_TOML, LEXICON_TOML_NAME,
};
use onyx_filter::lexicon;

#[test]
fn seeding_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(write_default_lexicon(dir.path()).expect("seed"));
    assert!(!write_default_lexicon(dir.path()).expect("seed again"));

    let text = fs::read_to_string(dir.path().join(LEXICON_TOML_NAME)).unwrap();
    assert!(matches_embedded(text.as_bytes()));
}

#[test]
fn seeding_keeps_existing_copy() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(LEXICON_TOML_NAME);
    fs::write(&path, "name = \"mine\"\n").unwrap();
    assert!(!write_default_lexicon(dir.path()).expect("seed"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "name = \"mine\"\n");
}

#[test]
fn canonical_copy_loads_builtin() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_default_lexicon(dir.path().join("lexicon")).unwrap();
    let loaded = load_lexicon(&lexicon_path(dir.path()), true).expect("load");
    assert_eq!(loaded.origin, LexiconOrigin::Canonical);
    assert_eq!(&loaded.lexicon, lexicon::builtin());
}

#[test]
fn locked_load_restores_edited_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = lexicon_path(dir.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "name = \"tampered\"\n").unwrap();

    let loaded = load_lexicon(&path, true).expect("load");
    assert_eq!(loaded.origin, LexiconOrigin::Restored);
    assert_eq!(loaded.lexicon.name(), "egyptian-arabic");
    assert_eq!(fs::read_to_string(&path).unwrap(), LEXICON_TOML);
}

#[test]
fn unlocked_load_keeps_local_edits() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = lexicon_path(dir.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let custom = "name = \"mine\"\n[[groups]]\ncategory = \"general\"\nterms = [\"blorp\"]\n";
    fs::write(&path, custom).unwrap();

    let loaded = load_lexicon(&path, false).expect("load");
    assert_eq!(loaded.origin, LexiconOrigin::Local);
    assert_eq!(loaded.lexicon.terms().collect::<Vec<_>>(), vec!["blorp"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), custom);
}

#[test]
fn missing_canonical_file_is_seeded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = lexicon_path(dir.path());
    let loaded = load_lexicon(&path, false).expect("load");
    assert_eq!(loaded.origin, LexiconOrigin::Seeded);
    assert!(path.exists());
    assert!(!loaded.lexicon.is_empty());
}

#[test]
fn unwritable_canonical_path_falls_back_to_embedded() {
    let dir = tempfile::tempdir().expect("tempdir");
    // a regular file where the lexicon directory should be
    let blocker = dir.path().join("lexicon");
    fs::write(&blocker, "").unwrap();

    let loaded = load_lexicon(&blocker.join(LEXICON_TOML_NAME), true).expect("load");
    assert_eq!(loaded.origin, LexiconOrigin::Embedded);
    assert_eq!(&loaded.lexicon, lexicon::builtin());
}

#[test]
fn missing_custom_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(load_lexicon(&dir.path().join("other.toml"), true).is_err());
}

#[test]
fn empty_or_malformed_custom_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let empty = dir.path().join("empty.toml");
    fs::write(&empty, "  \n").unwrap();
    assert!(load_lexicon(&empty, false).is_err());

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[[groups]]\ncategory = \"nope\"\n").unwrap();
    assert!(load_lexicon(&bad, false).is_err());
}
