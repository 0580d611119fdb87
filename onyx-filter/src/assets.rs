//! Embedded lexicon asset and the on-disk copy seeded from it.
//!
//! A file named [`LEXICON_TOML_NAME`] is the canonical lexicon: its bytes are
//! compared against the embedded copy by blake3 digest, and in locked mode an
//! edited copy is put back. Any other file name is a custom lexicon and is
//! read as-is.

use anyhow::{bail, Context, Result};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::lexicon::{self, Lexicon};

pub const LEXICON_TOML_NAME: &str = "lexicon.toml";
pub const LEXICON_TOML: &str = include_str!("../assets/lexicon.toml");

/// Where a loaded lexicon came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconOrigin {
    /// A custom file, or an edited canonical file in unlocked mode.
    Local,
    /// The canonical file, identical to the embedded copy.
    Canonical,
    /// The canonical file had been edited; locked mode overwrote it.
    Restored,
    /// The canonical file was missing and has been written.
    Seeded,
    /// The canonical file was missing and could not be written; the embedded copy is in use.
    Embedded,
}

#[derive(Debug, Clone)]
pub struct LoadedLexicon {
    pub lexicon: Lexicon,
    pub origin: LexiconOrigin,
}

/// `<root>/lexicon/lexicon.toml`
pub fn lexicon_path(root: &Path) -> PathBuf {
    root.join("lexicon").join(LEXICON_TOML_NAME)
}

/// True when `bytes` hash to the embedded lexicon's blake3 digest.
pub fn matches_embedded(bytes: &[u8]) -> bool {
    blake3::hash(bytes) == blake3::hash(LEXICON_TOML.as_bytes())
}

/// Write the embedded lexicon into `dir` unless a copy is already there.
/// Returns whether the file was created.
pub fn write_default_lexicon(dir: impl AsRef<Path>) -> Result<bool> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("create lexicon dir {}", dir.display()))?;
    let path = dir.join(LEXICON_TOML_NAME);
    match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(mut f) => {
            f.write_all(LEXICON_TOML.as_bytes())
                .with_context(|| format!("write {}", path.display()))?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e).with_context(|| format!("create {}", path.display())),
    }
}

/// Load and parse the lexicon at `path`.
///
/// Custom files must exist and be non-empty. The canonical file is verified
/// against the embedded copy; with `locked` an edited copy is overwritten,
/// otherwise local edits win. A missing canonical file is seeded.
pub fn load_lexicon(path: &Path, locked: bool) -> Result<LoadedLexicon> {
    let canonical = path.file_name().and_then(|n| n.to_str()) == Some(LEXICON_TOML_NAME);

    if !path.exists() {
        if !canonical {
            bail!("lexicon file {} does not exist", path.display());
        }
        let origin = match seed_file(path) {
            Ok(()) => LexiconOrigin::Seeded,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not write lexicon file; using the embedded copy"
                );
                LexiconOrigin::Embedded
            }
        };
        return Ok(embedded(origin));
    }

    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    if canonical && matches_embedded(&bytes) {
        return Ok(embedded(LexiconOrigin::Canonical));
    }
    if canonical && locked {
        fs::write(path, LEXICON_TOML)
            .with_context(|| format!("restore embedded lexicon to {}", path.display()))?;
        tracing::info!(path = %path.display(), "edited lexicon restored from embedded copy");
        return Ok(embedded(LexiconOrigin::Restored));
    }

    let text = String::from_utf8(bytes)
        .with_context(|| format!("lexicon {} is not UTF-8", path.display()))?;
    if text.trim().is_empty() {
        bail!("lexicon file {} is empty", path.display());
    }
    let lexicon = Lexicon::from_toml_str(&text)
        .with_context(|| format!("parse lexicon {}", path.display()))?;
    Ok(LoadedLexicon {
        lexicon,
        origin: LexiconOrigin::Local,
    })
}

fn embedded(origin: LexiconOrigin) -> LoadedLexicon {
    LoadedLexicon {
        lexicon: lexicon::builtin().clone(),
        origin,
    }
}

fn seed_file(path: &Path) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, LEXICON_TOML)
}
