//! OnyxBox message filter.
//!
//! - Lexicon of flagged terms (embedded TOML, or custom)
//! - Separator-stripping normalization against spaced-out spellings
//! - Length-gated token matching (`has_profanity` / `is_toxic`)
//! - Redaction with configurable mask length

pub mod assets;
pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod normalize;
pub mod redactor;
pub mod types;

pub use assets::{load_lexicon, write_default_lexicon, LexiconOrigin, LoadedLexicon};
pub use error::LexiconError;
pub use lexicon::{Entry, Lexicon};
pub use matcher::{has_profanity, is_toxic, screen, Matcher, Thresholds};
pub use normalize::strip_separators;
pub use redactor::{clean_text, MaskLength, RedactOptions, RedactScope, Redactor};
pub use types::{Category, MatchKind, Screening};

/// --- WASM entrypoint (only compiled when feature "wasm" is enabled) ---
///
/// Missing input from JS (`null` / `undefined`) is treated as an empty string.
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod wasm_api {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(js_name = isToxic)]
    pub fn is_toxic(text: Option<String>) -> bool {
        super::is_toxic(text.as_deref().unwrap_or(""))
    }

    #[wasm_bindgen(js_name = cleanText)]
    pub fn clean_text(text: Option<String>) -> String {
        super::clean_text(text.as_deref().unwrap_or(""))
    }

    #[wasm_bindgen]
    pub fn screen(text: Option<String>) -> String {
        let s = super::screen(text.as_deref().unwrap_or(""));
        serde_json::to_string(&s).unwrap_or_else(|_| "{\"toxic\":false}".to_string())
    }
}
