// src/commands/api.rs
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};

use onyx_filter::{Category, MatchKind};

use crate::config::OnyxConfig;
use crate::services::audit::{record_decision, ModerationRecord};
use crate::services::composer::{Draft, GateVerdict, SubmissionGate};
use crate::services::screening::Screener;

/// Facade over config, filter and gate for one data root.
pub struct Commands {
    root: PathBuf,
    config: OnyxConfig,
    screener: Screener,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub toxic: bool,
    pub has_profanity: bool,
    pub term: Option<String>,
    pub category: Option<Category>,
    pub kind: Option<MatchKind>,
    pub cleaned: String,
}

impl Commands {
    /// Load `<root>/config.toml` (defaults when absent) and build the filter.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let config = OnyxConfig::load(&root)?;
        Self::from_parts(root, config)
    }

    pub fn from_parts(root: PathBuf, config: OnyxConfig) -> Result<Self> {
        let screener = Screener::from_config(&config.filter)?;
        Ok(Self { root, config, screener })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &OnyxConfig {
        &self.config
    }

    pub fn screener(&self) -> &Screener {
        &self.screener
    }

    /// Screen text without side effects.
    pub fn check(&self, text: &str) -> CheckReport {
        let screening = self.screener.screen(text);
        CheckReport {
            toxic: screening.toxic,
            has_profanity: self.screener.matcher().has_profanity(text),
            term: screening.term,
            category: screening.category,
            kind: screening.kind,
            cleaned: self.screener.clean_text(text),
        }
    }

    pub fn clean(&self, text: &str) -> String {
        self.screener.clean_text(text)
    }

    /// Run the submission gate now and log the decision.
    pub fn submit(&self, draft: &Draft) -> GateVerdict {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.submit_at(draft, now_ms)
    }

    /// Run the submission gate at `now_ms` and log the decision.
    /// A logbook failure is reported but never changes the verdict.
    pub fn submit_at(&self, draft: &Draft, now_ms: u64) -> GateVerdict {
        let gate = SubmissionGate::new(&self.screener, &self.config.composer);
        let verdict = gate.evaluate(draft, now_ms);

        let record = ModerationRecord::from_verdict(
            &self.screener,
            &draft.content,
            draft.sender_uid.as_deref(),
            &verdict,
            self.config.logbook.preview_len,
        );
        if let Err(e) = record_decision(&self.config.logbook, &record) {
            tracing::warn!(error = %e, "failed to append moderation record");
        }
        verdict
    }
}
