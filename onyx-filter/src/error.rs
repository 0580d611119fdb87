use thiserror::Error;

/// Errors raised while loading a custom lexicon. Matching itself never fails.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("invalid lexicon TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("blank term in `{category}` group at position {index}")]
    BlankTerm { category: String, index: usize },
}
