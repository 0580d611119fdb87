//! services/audit.rs
//! Moderation logbook: one JSONL record per gate evaluation.
//!
//! Records carry a redacted preview only; raw flagged content is never written.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use onyx_filter::{Category, MatchKind};

use crate::config::LogbookConfig;
use crate::services::composer::{Decision, GateVerdict};
use crate::services::screening::Screener;
use crate::utils::logbook::append_jsonl;

#[derive(Debug, Clone, Serialize)]
pub struct ModerationRecord {
    pub id: String,
    pub ts: DateTime<Utc>,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MatchKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_uid: Option<String>,
    pub content_preview: String,
}

impl ModerationRecord {
    pub fn from_verdict(
        screener: &Screener,
        content: &str,
        sender_uid: Option<&str>,
        verdict: &GateVerdict,
        preview_len: usize,
    ) -> Self {
        let (event, reason) = match &verdict.decision {
            Decision::Accept => ("accepted", None),
            Decision::Reject(r) => ("rejected", Some(r.code())),
        };
        // Rejections that stop before the filter carry a clean screening, so
        // screen the content here. Spaced-out spellings survive word
        // redaction and are masked wholesale.
        let bypass = if verdict.screening.toxic {
            verdict.screening.kind == Some(MatchKind::Bypass)
        } else {
            screener.screen(content).kind == Some(MatchKind::Bypass)
        };
        let redacted = if bypass {
            content
                .chars()
                .map(|c| if c.is_whitespace() { c } else { '*' })
                .collect()
        } else {
            screener.clean_text(content)
        };
        let preview = redacted.chars().take(preview_len).collect::<String>();
        Self {
            id: Uuid::new_v4().to_string(),
            ts: Utc::now(),
            event,
            reason,
            category: verdict.screening.category,
            kind: verdict.screening.kind,
            sender_uid: sender_uid.map(str::to_string),
            content_preview: preview,
        }
    }
}

/// Append a record if the logbook is enabled.
pub fn record_decision(cfg: &LogbookConfig, record: &ModerationRecord) -> Result<()> {
    if !cfg.enabled {
        return Ok(());
    }
    append_jsonl(&cfg.path, record)
}
