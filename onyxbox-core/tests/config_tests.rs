use std::fs;

use onyx_filter::{MaskLength, RedactScope, Thresholds};
use onyxbox_core::config::{OnyxConfig, DEFAULT_MOODS};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = OnyxConfig::load(dir.path()).expect("load");
    assert_eq!(cfg.filter.thresholds, Thresholds::default());
    assert_eq!(cfg.composer.max_message_length, 500);
    assert_eq!(cfg.composer.cooldown_ms, 60_000);
    assert_eq!(cfg.composer.moods.len(), DEFAULT_MOODS.len());
    assert!(cfg.logbook.enabled);
    assert_eq!(
        cfg.logbook.path,
        dir.path().join("logbook").join("moderation.jsonl")
    );
}

#[test]
fn partial_file_overrides_only_named_keys() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        r#"
[filter]
short_term_max_len = 2
mask_length = "match"
redact_scope = "terms"
lexicon_file = "lexicon/custom.toml"

[composer]
cooldown_ms = 0
"#,
    )
    .unwrap();

    let cfg = OnyxConfig::load(dir.path()).expect("load");
    let t = cfg.filter.thresholds;
    assert_eq!(t.short_term_max_len, 2);
    assert_eq!(t.substring_token_min_len, 4);
    assert_eq!(cfg.filter.mask_length, MaskLength::Match);
    assert_eq!(cfg.filter.redact_scope, RedactScope::Terms);
    assert_eq!(
        cfg.filter.lexicon_file.as_deref(),
        Some(dir.path().join("lexicon/custom.toml").as_path())
    );
    assert_eq!(cfg.composer.cooldown_ms, 0);
    assert_eq!(cfg.composer.max_message_length, 500);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[filter\nbroken").unwrap();
    let err = OnyxConfig::load(dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("parsing config file"));
}

#[test]
fn threshold_keys_sit_directly_under_filter() {
    let cfg = OnyxConfig::from_toml_str(
        r##"
[filter]
short_term_max_len = 2
substring_token_min_len = 6
bypass_text_min_len = 8
bypass_term_min_len = 5
mask_char = "#"
"##,
    )
    .expect("parse");
    assert_eq!(
        cfg.filter.thresholds,
        Thresholds {
            short_term_max_len: 2,
            substring_token_min_len: 6,
            bypass_text_min_len: 8,
            bypass_term_min_len: 5,
        }
    );
    assert_eq!(cfg.filter.redact_options().mask_char, '#');
    assert_eq!(cfg.filter.mask_length, MaskLength::Pattern);

    assert!(OnyxConfig::from_toml_str("[filter]\nshort_term_max_len = \"three\"\n").is_err());
}
