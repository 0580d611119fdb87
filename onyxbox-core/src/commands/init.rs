// onyxbox-core/src/commands/init.rs

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use onyx_filter::assets::{write_default_lexicon, LEXICON_TOML_NAME};

const CONFIG_FILE: &str = "config.toml";
const LAYOUT_DIRS: [&str; 2] = ["logbook", "lexicon"];

/// What `ensure_initialized` found and what it had to create, as paths
/// relative to the root (`.` is the root itself).
#[derive(Debug, Clone)]
pub struct InitReport {
    pub root: PathBuf,
    pub created: Vec<String>,
    pub existed: Vec<String>,
}

impl InitReport {
    fn note(&mut self, rel: impl Into<String>, created: bool) {
        if created {
            self.created.push(rel.into());
        } else {
            self.existed.push(rel.into());
        }
    }
}

/// Resolve the data root. Allow override via ONYXBOX_ROOT (tests/deployments).
pub fn data_root() -> PathBuf {
    std::env::var_os("ONYXBOX_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".onyxbox"))
}

/// Lay out `root` (idempotent): `config.toml`, the logbook directory, and the
/// lexicon directory seeded with the embedded lexicon. Existing files are left alone.
pub fn ensure_initialized(root: &Path) -> Result<InitReport> {
    let mut report = InitReport {
        root: root.to_path_buf(),
        created: Vec::new(),
        existed: Vec::new(),
    };

    report.note(".", create_dir(root)?);
    for dir in LAYOUT_DIRS {
        report.note(dir, create_dir(&root.join(dir))?);
    }
    report.note(CONFIG_FILE, write_default_config(&root.join(CONFIG_FILE))?);
    report.note(
        format!("lexicon/{LEXICON_TOML_NAME}"),
        write_default_lexicon(root.join("lexicon"))?,
    );

    tracing::info!(
        root = %root.display(),
        created = report.created.len(),
        "data root initialized"
    );
    Ok(report)
}

fn create_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))?;
    Ok(true)
}

/// Write the default config unless one is already present. Never overwrites.
fn write_default_config(path: &Path) -> Result<bool> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut f) => {
            f.write_all(DEFAULT_CONFIG_TOML.as_bytes())
                .with_context(|| format!("write {}", path.display()))?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e).with_context(|| format!("create {}", path.display())),
    }
}

// ---------- defaults ----------

const DEFAULT_CONFIG_TOML: &str = r#"[system]
name = "onyxbox"
version = "0.1.0"

[filter]
short_term_max_len = 3
substring_token_min_len = 4
bypass_text_min_len = 5
bypass_term_min_len = 4
mask_length = "pattern"
redact_scope = "words"
mask_char = "*"
# lexicon_file = "lexicon/lexicon.toml"
lexicon_locked = false

[composer]
max_message_length = 500
cooldown_ms = 60000
moods = ["👻", "❤️", "😂", "😡", "😢", "🔥", "🥺", "💀", "🤡", "😈", "🫠", "💔"]
redact_on_accept = false

[logbook]
enabled = true
path = "logbook/moderation.jsonl"
preview_len = 120
"#;
