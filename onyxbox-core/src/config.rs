use anyhow::{Context, Result};
use onyx_filter::{MaskLength, RedactOptions, RedactScope, Thresholds};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Moods the composer offers by default.
pub const DEFAULT_MOODS: [&str; 12] = [
    "👻", "❤️", "😂", "😡", "😢", "🔥", "🥺", "💀", "🤡", "😈", "🫠", "💔",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnyxConfig {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub logbook: LogbookConfig,
}

impl OnyxConfig {
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join("config.toml");
        let mut cfg = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            Self::from_toml_str(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?
        } else {
            tracing::info!(
                "No config file found at {}. Using OnyxConfig::default().",
                path.display()
            );
            OnyxConfig::default()
        };
        cfg.resolve_paths(root);
        Ok(cfg)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str::<OnyxConfig>(text)?)
    }

    fn resolve_paths(&mut self, root: &Path) {
        if let Some(p) = self.filter.lexicon_file.take() {
            self.filter.lexicon_file = Some(absolutize(root, &p));
        }
        self.logbook.path = absolutize(root, &self.logbook.path);
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "SystemConfig::default_name")]
    pub name: String,
    #[serde(default = "SystemConfig::default_version")]
    pub version: String,
}

impl SystemConfig {
    fn default_name() -> String {
        "onyxbox".to_string()
    }

    fn default_version() -> String {
        "0.1.0".to_string()
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            version: Self::default_version(),
        }
    }
}

// -------------------------------------------------------------------------
// Filter: matcher thresholds, redaction, lexicon source
// -------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Matcher length gates, written as plain keys under `[filter]`.
    #[serde(flatten)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub mask_length: MaskLength,
    #[serde(default)]
    pub redact_scope: RedactScope,
    #[serde(default = "FilterConfig::default_mask_char")]
    pub mask_char: char,
    /// Custom lexicon TOML. `None` uses the embedded lexicon.
    #[serde(default)]
    pub lexicon_file: Option<PathBuf>,
    /// Restore an edited canonical lexicon file from the embedded copy.
    #[serde(default)]
    pub lexicon_locked: bool,
}

impl FilterConfig {
    fn default_mask_char() -> char {
        '*'
    }

    pub fn redact_options(&self) -> RedactOptions {
        RedactOptions {
            mask_length: self.mask_length,
            scope: self.redact_scope,
            mask_char: self.mask_char,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            mask_length: MaskLength::default(),
            redact_scope: RedactScope::default(),
            mask_char: Self::default_mask_char(),
            lexicon_file: None,
            lexicon_locked: false,
        }
    }
}

// -------------------------------------------------------------------------
// Composer: submission rules
// -------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ComposerConfig {
    #[serde(default = "ComposerConfig::default_max_message_length")]
    pub max_message_length: usize,
    #[serde(default = "ComposerConfig::default_cooldown_ms")]
    pub cooldown_ms: u64,
    #[serde(default = "ComposerConfig::default_moods")]
    pub moods: Vec<String>,
    /// Attach the redacted content to accepted verdicts.
    #[serde(default)]
    pub redact_on_accept: bool,
}

impl ComposerConfig {
    fn default_max_message_length() -> usize {
        500
    }

    fn default_cooldown_ms() -> u64 {
        60_000
    }

    fn default_moods() -> Vec<String> {
        DEFAULT_MOODS.iter().map(|m| m.to_string()).collect()
    }
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_message_length: Self::default_max_message_length(),
            cooldown_ms: Self::default_cooldown_ms(),
            moods: Self::default_moods(),
            redact_on_accept: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogbookConfig {
    #[serde(default = "LogbookConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "LogbookConfig::default_path")]
    pub path: PathBuf,
    #[serde(default = "LogbookConfig::default_preview_len")]
    pub preview_len: usize,
}

impl LogbookConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_path() -> PathBuf {
        PathBuf::from("logbook/moderation.jsonl")
    }

    fn default_preview_len() -> usize {
        120
    }
}

impl Default for LogbookConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            path: Self::default_path(),
            preview_len: Self::default_preview_len(),
        }
    }
}

fn absolutize(root: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        root.join(value)
    }
}
