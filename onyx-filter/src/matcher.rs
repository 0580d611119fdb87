use serde::Deserialize;

use crate::lexicon::{self, Entry, Lexicon};
use crate::normalize::{fold_case, strip_separators, tokenize};
use crate::types::{MatchKind, Screening};

/// Length gates that trade recall for precision.
///
/// All lengths are counted in chars. Comparisons are strict (`>`), except
/// `short_term_max_len` which is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Entries no longer than this only match a whole token.
    pub short_term_max_len: usize,
    /// A token must be longer than this to be searched for longer entries.
    pub substring_token_min_len: usize,
    /// The separator-stripped pass runs only for texts longer than this.
    pub bypass_text_min_len: usize,
    /// The separator-stripped pass only looks for entries longer than this.
    pub bypass_term_min_len: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            short_term_max_len: 3,
            substring_token_min_len: 4,
            bypass_text_min_len: 5,
            bypass_term_min_len: 4,
        }
    }
}

/// Lexicon matcher. Cheap to copy; borrows the lexicon.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    lexicon: &'a Lexicon,
    thresholds: Thresholds,
}

impl Matcher<'static> {
    /// Builtin lexicon with default thresholds.
    pub fn builtin() -> Self {
        Self::new(lexicon::builtin(), Thresholds::default())
    }
}

impl<'a> Matcher<'a> {
    pub fn new(lexicon: &'a Lexicon, thresholds: Thresholds) -> Self {
        Self { lexicon, thresholds }
    }

    pub fn lexicon(&self) -> &'a Lexicon {
        self.lexicon
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Word-level check: short entries must equal a token, longer entries may
    /// also hide inside a long token.
    pub fn has_profanity(&self, text: &str) -> bool {
        self.find_in_tokens(text).is_some()
    }

    /// Submission gate: word-level check, then the separator-stripped pass.
    pub fn is_toxic(&self, text: &str) -> bool {
        self.screen(text).toxic
    }

    /// Same decision as [`Matcher::is_toxic`], reporting what matched.
    pub fn screen(&self, text: &str) -> Screening {
        if text.is_empty() {
            return Screening::clean();
        }
        if let Some((entry, kind)) = self.find_in_tokens(text) {
            return Screening::flagged(entry.term(), entry.category(), kind);
        }
        if text.chars().count() > self.thresholds.bypass_text_min_len {
            if let Some(entry) = self.find_in_collapsed(text) {
                return Screening::flagged(entry.term(), entry.category(), MatchKind::Bypass);
            }
        }
        Screening::clean()
    }

    fn find_in_tokens(&self, text: &str) -> Option<(&'a Entry, MatchKind)> {
        let lowered = fold_case(text);
        let tokens: Vec<(&str, usize)> = tokenize(&lowered)
            .map(|t| (t, t.chars().count()))
            .collect();
        if tokens.is_empty() {
            return None;
        }

        let t = &self.thresholds;
        for entry in self.lexicon.entries() {
            let term = entry.folded();
            if entry.char_len() == 0 {
                continue;
            }
            if entry.char_len() <= t.short_term_max_len {
                if tokens.iter().any(|(tok, _)| *tok == term) {
                    return Some((entry, MatchKind::Exact));
                }
                continue;
            }
            for (tok, len) in &tokens {
                if *tok == term {
                    return Some((entry, MatchKind::Exact));
                }
                if *len > t.substring_token_min_len && tok.contains(term) {
                    return Some((entry, MatchKind::Substring));
                }
            }
        }
        None
    }

    // A message that collapses to exactly one entry ("ك س م ك") is caught
    // regardless of entry length; otherwise only long entries are searched.
    fn find_in_collapsed(&self, text: &str) -> Option<&'a Entry> {
        let collapsed = fold_case(&strip_separators(text));
        if collapsed.is_empty() {
            return None;
        }
        self.lexicon.entries().iter().find(|entry| {
            entry.char_len() > 0
                && (collapsed == entry.folded()
                    || (entry.char_len() > self.thresholds.bypass_term_min_len
                        && collapsed.contains(entry.folded())))
        })
    }
}

/// [`Matcher::has_profanity`] over the builtin lexicon.
pub fn has_profanity(text: &str) -> bool {
    Matcher::builtin().has_profanity(text)
}

/// [`Matcher::is_toxic`] over the builtin lexicon.
pub fn is_toxic(text: &str) -> bool {
    Matcher::builtin().is_toxic(text)
}

/// [`Matcher::screen`] over the builtin lexicon.
pub fn screen(text: &str) -> Screening {
    Matcher::builtin().screen(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn small() -> Lexicon {
        Lexicon::from_terms(
            "test",
            [
                ("ab", Category::General),
                ("abcd", Category::General),
                ("Bad", Category::Classic),
                ("longword", Category::Bypass),
            ],
        )
    }

    #[test]
    fn short_entry_needs_whole_token() {
        let lex = small();
        let m = Matcher::new(&lex, Thresholds::default());
        assert!(m.has_profanity("x ab y"));
        assert!(m.has_profanity("(ab)"));
        assert!(!m.has_profanity("xaby"));
        assert!(!m.has_profanity("cab"));
    }

    #[test]
    fn long_entry_substring_needs_long_token() {
        let lex = small();
        let m = Matcher::new(&lex, Thresholds::default());
        assert!(m.has_profanity("abcd"));
        assert!(m.has_profanity("xabcd"));
        // "bad" is short: exact only
        assert!(!m.has_profanity("badly"));
        assert!(m.has_profanity("BAD!"));
    }

    #[test]
    fn bypass_path_reports_kind() {
        let lex = small();
        let m = Matcher::new(&lex, Thresholds::default());
        let s = m.screen("l o n g w o r d");
        assert!(s.toxic);
        assert_eq!(s.kind, Some(MatchKind::Bypass));
        assert_eq!(s.term.as_deref(), Some("longword"));
    }

    #[test]
    fn bypass_skipped_for_short_texts() {
        let lex = small();
        let m = Matcher::new(&lex, Thresholds::default());
        // collapses to the entry "ab", but five chars is not long enough
        assert!(!m.is_toxic("a - b"));
        assert!(m.is_toxic("a -  b"));
    }

    #[test]
    fn thresholds_are_configurable() {
        let lex = small();
        let strict = Thresholds {
            short_term_max_len: 4,
            ..Thresholds::default()
        };
        let m = Matcher::new(&lex, strict);
        // "abcd" is now short, so it no longer matches inside "xabcd"
        assert!(!m.has_profanity("xabcd"));
        assert!(m.has_profanity("abcd"));
    }

    #[test]
    fn empty_lexicon_flags_nothing() {
        let lex = Lexicon::empty();
        let m = Matcher::new(&lex, Thresholds::default());
        assert!(!m.is_toxic("anything at all goes here"));
    }
}
