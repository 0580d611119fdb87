//! services/composer.rs
//! Submission gate run by the message composer before a message is accepted.
//!
//! Checks run in a fixed order and the first failure wins:
//! empty → too long → cooling down → unknown mood → toxic.
//! A toxic message is rejected outright; it is never silently cleaned.

use serde::{Deserialize, Serialize};

use onyx_filter::{Category, Screening};

use crate::config::ComposerConfig;
use crate::services::screening::Screener;

/// What the composer is about to send.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Draft {
    pub content: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub sender_uid: Option<String>,
    /// When this sender last had a message accepted (ms since Unix epoch).
    #[serde(default)]
    pub last_sent_ms: Option<u64>,
}

impl Draft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    Empty,
    TooLong { len: usize, max: usize },
    CoolingDown { remaining_ms: u64 },
    UnknownMood { mood: String },
    Toxic { term: Option<String>, category: Option<Category> },
}

impl RejectReason {
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::Empty => "empty",
            RejectReason::TooLong { .. } => "too_long",
            RejectReason::CoolingDown { .. } => "cooling_down",
            RejectReason::UnknownMood { .. } => "unknown_mood",
            RejectReason::Toxic { .. } => "toxic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject(RejectReason),
}

#[derive(Debug, Clone, Serialize)]
pub struct GateVerdict {
    pub decision: Decision,
    /// Content to store: redacted when `redact_on_accept` is set. `None` on reject.
    pub sanitized: Option<String>,
    /// Filter result for the content (clean unless the filter ran and matched).
    pub screening: Screening,
}

impl GateVerdict {
    fn reject(reason: RejectReason) -> Self {
        Self {
            decision: Decision::Reject(reason),
            sanitized: None,
            screening: Screening::clean(),
        }
    }

    pub fn accepted(&self) -> bool {
        self.decision == Decision::Accept
    }

    pub fn reason(&self) -> Option<&RejectReason> {
        match &self.decision {
            Decision::Accept => None,
            Decision::Reject(r) => Some(r),
        }
    }
}

pub struct SubmissionGate<'a> {
    screener: &'a Screener,
    cfg: &'a ComposerConfig,
}

impl<'a> SubmissionGate<'a> {
    pub fn new(screener: &'a Screener, cfg: &'a ComposerConfig) -> Self {
        Self { screener, cfg }
    }

    /// Evaluate a draft at time `now_ms`. Pure: no I/O, no clock reads.
    pub fn evaluate(&self, draft: &Draft, now_ms: u64) -> GateVerdict {
        if draft.content.trim().is_empty() {
            return GateVerdict::reject(RejectReason::Empty);
        }

        let len = draft.content.chars().count();
        if len > self.cfg.max_message_length {
            return GateVerdict::reject(RejectReason::TooLong {
                len,
                max: self.cfg.max_message_length,
            });
        }

        if let Some(last) = draft.last_sent_ms {
            let elapsed = now_ms.saturating_sub(last);
            if elapsed < self.cfg.cooldown_ms {
                return GateVerdict::reject(RejectReason::CoolingDown {
                    remaining_ms: self.cfg.cooldown_ms - elapsed,
                });
            }
        }

        if let Some(mood) = draft.mood.as_deref() {
            if !self.cfg.moods.iter().any(|m| m == mood) {
                return GateVerdict::reject(RejectReason::UnknownMood {
                    mood: mood.to_string(),
                });
            }
        }

        let mut screening = self.screener.screen(&draft.content);
        if !screening.toxic {
            if let Some(name) = draft.sender_name.as_deref() {
                screening = self.screener.screen(name);
            }
        }
        if screening.toxic {
            tracing::debug!(
                term = screening.term.as_deref().unwrap_or(""),
                "draft rejected by filter"
            );
            return GateVerdict {
                decision: Decision::Reject(RejectReason::Toxic {
                    term: screening.term.clone(),
                    category: screening.category,
                }),
                sanitized: None,
                screening,
            };
        }

        let sanitized = if self.cfg.redact_on_accept {
            self.screener.clean_text(&draft.content)
        } else {
            draft.content.clone()
        };
        GateVerdict {
            decision: Decision::Accept,
            sanitized: Some(sanitized),
            screening,
        }
    }
}
