//! Text normalization helpers shared by the matcher and redactor.
//!
//! Policy:
//! - `strip_separators` removes the characters people insert between letters
//!   to dodge the filter (`space . _ - *`). Case is untouched.
//! - `tokenize` splits on whitespace and common punctuation for word-level
//!   comparison.
//! - `fold_case` is Unicode-aware lowercasing (`char::to_lowercase`).
//!
//! Keep this logic single-sourced so the matcher and redactor never drift.

/// Characters removed by [`strip_separators`].
pub const BYPASS_SEPARATORS: [char; 5] = [' ', '.', '_', '-', '*'];

/// Punctuation that splits tokens in addition to whitespace.
pub const TOKEN_PUNCTUATION: [char; 13] = [
    '.', ',', '!', '?', '(', ')', '[', ']', '{', '}', '\\', '/', '-',
];

#[inline]
fn is_token_boundary(c: char) -> bool {
    c.is_whitespace() || c == '_' || TOKEN_PUNCTUATION.contains(&c)
}

/// Remove every bypass separator, keeping all other characters in order.
pub fn strip_separators(text: &str) -> String {
    text.chars().filter(|c| !BYPASS_SEPARATORS.contains(c)).collect()
}

/// Split text into non-empty tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_token_boundary).filter(|t| !t.is_empty())
}

/// Lowercase for case-insensitive comparison.
pub fn fold_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        out.extend(ch.to_lowercase());
    }
    out
}
