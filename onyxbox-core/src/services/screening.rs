//! services/screening.rs
//! Builds the filter from config: lexicon source, thresholds and redaction options.

use anyhow::Result;
use std::borrow::Cow;
use std::path::Path;

use onyx_filter::assets::{load_lexicon, LexiconOrigin};
use onyx_filter::lexicon;
use onyx_filter::{Lexicon, Matcher, RedactOptions, Redactor, Screening, Thresholds};

use crate::config::FilterConfig;

/// Owns (or borrows the builtin) lexicon and hands out matchers over it.
#[derive(Debug, Clone)]
pub struct Screener {
    lexicon: Cow<'static, Lexicon>,
    thresholds: Thresholds,
    redact: RedactOptions,
}

impl Default for Screener {
    fn default() -> Self {
        Self::with_lexicon(
            Cow::Borrowed(lexicon::builtin()),
            Thresholds::default(),
            RedactOptions::default(),
        )
    }
}

impl Screener {
    pub fn with_lexicon(
        lexicon: Cow<'static, Lexicon>,
        thresholds: Thresholds,
        redact: RedactOptions,
    ) -> Self {
        Self { lexicon, thresholds, redact }
    }

    /// Build from `[filter]` config. A configured custom lexicon file must
    /// exist and parse; the canonical `lexicon.toml` is seeded when missing.
    pub fn from_config(cfg: &FilterConfig) -> Result<Self> {
        let lexicon = match &cfg.lexicon_file {
            Some(path) => Cow::Owned(load_lexicon_file(path, cfg.lexicon_locked)?),
            None => Cow::Borrowed(lexicon::builtin()),
        };
        tracing::debug!(
            lexicon = lexicon.name(),
            entries = lexicon.len(),
            "screener ready"
        );
        if lexicon.is_empty() {
            tracing::warn!("lexicon is empty; no message will be flagged");
        }
        Ok(Self::with_lexicon(lexicon, cfg.thresholds, cfg.redact_options()))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.lexicon, self.thresholds)
    }

    pub fn redactor(&self) -> Redactor<'_> {
        Redactor::new(self.matcher(), self.redact)
    }

    pub fn is_toxic(&self, text: &str) -> bool {
        self.matcher().is_toxic(text)
    }

    pub fn screen(&self, text: &str) -> Screening {
        self.matcher().screen(text)
    }

    pub fn clean_text(&self, text: &str) -> String {
        self.redactor().clean_text(text)
    }
}

fn load_lexicon_file(path: &Path, locked: bool) -> Result<Lexicon> {
    let loaded = load_lexicon(path, locked)?;
    tracing::info!(
        path = %path.display(),
        name = loaded.lexicon.name(),
        entries = loaded.lexicon.len(),
        origin = ?loaded.origin,
        "loaded lexicon file"
    );
    if loaded.origin == LexiconOrigin::Restored {
        tracing::warn!(path = %path.display(), "lexicon file was edited and has been restored");
    }
    Ok(loaded.lexicon)
}
