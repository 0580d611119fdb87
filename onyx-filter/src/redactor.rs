//! Masking of flagged words for display and storage.

use serde::{Deserialize, Serialize};

use crate::matcher::Matcher;
use crate::normalize::fold_case;

/// How long each mask run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskLength {
    /// As long as the flagged word (or lexicon term) being searched for.
    #[default]
    Pattern,
    /// As long as the run actually replaced in the text.
    Match,
}

/// What gets searched for and masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactScope {
    /// Whitespace-separated words of the input that the matcher flags.
    #[default]
    Words,
    /// Every lexicon term, wherever it occurs.
    Terms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedactOptions {
    pub mask_length: MaskLength,
    pub scope: RedactScope,
    pub mask_char: char,
}

impl Default for RedactOptions {
    fn default() -> Self {
        Self {
            mask_length: MaskLength::default(),
            scope: RedactScope::default(),
            mask_char: '*',
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Redactor<'a> {
    matcher: Matcher<'a>,
    options: RedactOptions,
}

impl Redactor<'static> {
    /// Builtin lexicon, default thresholds and options.
    pub fn builtin() -> Self {
        Self::new(Matcher::builtin(), RedactOptions::default())
    }
}

impl<'a> Redactor<'a> {
    pub fn new(matcher: Matcher<'a>, options: RedactOptions) -> Self {
        Self { matcher, options }
    }

    pub fn options(&self) -> RedactOptions {
        self.options
    }

    /// Return `text` with flagged words masked. Whitespace is preserved.
    pub fn clean_text(&self, text: &str) -> String {
        match self.options.scope {
            RedactScope::Words => {
                let mut out = text.to_string();
                for word in text.split_whitespace() {
                    if self.matcher.has_profanity(word) {
                        out = self.mask_all(&out, word);
                    }
                }
                out
            }
            RedactScope::Terms => self
                .matcher
                .lexicon()
                .terms()
                .fold(text.to_string(), |out, term| self.mask_all(&out, term)),
        }
    }

    /// Mask every case-insensitive, non-overlapping occurrence of `pattern`.
    fn mask_all(&self, text: &str, pattern: &str) -> String {
        let pat: Vec<char> = fold_case(pattern).chars().collect();
        if pat.is_empty() {
            return text.to_string();
        }
        let (chars, spans) = folded_chars_with_spans(text);
        let plen = pat.len();
        if plen > chars.len() {
            return text.to_string();
        }

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        let mut i = 0usize;
        while i + plen <= chars.len() {
            if chars[i..i + plen] == pat[..] {
                let (s, _) = spans[i];
                let (_, e) = spans[i + plen - 1];
                ranges.push((s, e));
                i += plen;
                // skip the tail of a char whose lowercase expanded to several
                while i < spans.len() && spans[i].0 < e {
                    i += 1;
                }
            } else {
                i += 1;
            }
        }
        if ranges.is_empty() {
            return text.to_string();
        }

        let pattern_len = pattern.chars().count();
        let mut out = text.to_string();
        for (s, e) in ranges.into_iter().rev() {
            let n = match self.options.mask_length {
                MaskLength::Pattern => pattern_len,
                MaskLength::Match => text[s..e].chars().count(),
            };
            let mask: String = std::iter::repeat(self.options.mask_char).take(n).collect();
            out.replace_range(s..e, &mask);
        }
        out
    }
}

/// Lower-cased char view of `s` plus the original byte span of each char.
fn folded_chars_with_spans(s: &str) -> (Vec<char>, Vec<(usize, usize)>) {
    let mut chars = Vec::with_capacity(s.len());
    let mut spans = Vec::with_capacity(s.len());
    for (start, ch) in s.char_indices() {
        let end = start + ch.len_utf8();
        for lc in ch.to_lowercase() {
            chars.push(lc);
            spans.push((start, end));
        }
    }
    (chars, spans)
}

/// [`Redactor::clean_text`] with the builtin lexicon and default options.
pub fn clean_text(text: &str) -> String {
    Redactor::builtin().clean_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::matcher::Thresholds;
    use crate::types::Category;

    fn lex() -> Lexicon {
        Lexicon::from_terms("t", [("bad", Category::General), ("worse", Category::General)])
    }

    #[test]
    fn masks_every_occurrence_case_insensitively() {
        let l = lex();
        let r = Redactor::new(Matcher::new(&l, Thresholds::default()), RedactOptions::default());
        assert_eq!(r.clean_text("bad BAD Bad ok"), "*** *** *** ok");
    }

    #[test]
    fn whitespace_is_preserved() {
        let l = lex();
        let r = Redactor::new(Matcher::new(&l, Thresholds::default()), RedactOptions::default());
        assert_eq!(r.clean_text("  bad\t\tok \n"), "  ***\t\tok \n");
    }

    #[test]
    fn pattern_length_counts_the_whole_word() {
        let l = lex();
        let r = Redactor::new(Matcher::new(&l, Thresholds::default()), RedactOptions::default());
        assert_eq!(r.clean_text("bad!"), "****");
    }

    #[test]
    fn terms_scope_masks_inside_words() {
        let l = lex();
        let opts = RedactOptions {
            scope: RedactScope::Terms,
            ..RedactOptions::default()
        };
        let r = Redactor::new(Matcher::new(&l, Thresholds::default()), opts);
        assert_eq!(r.clean_text("badly worsened"), "***ly *****ned");
    }

    #[test]
    fn match_length_uses_replaced_run() {
        // 'İ' lowercases to two chars, so pattern and match lengths differ.
        let l = Lexicon::from_terms("t", [("i\u{307}x", Category::General)]);
        let m = Matcher::new(&l, Thresholds::default());
        let by_match = Redactor::new(
            m,
            RedactOptions {
                mask_length: MaskLength::Match,
                scope: RedactScope::Terms,
                ..RedactOptions::default()
            },
        );
        assert_eq!(by_match.clean_text("İx"), "**");
        let by_pattern = Redactor::new(
            m,
            RedactOptions {
                scope: RedactScope::Terms,
                ..RedactOptions::default()
            },
        );
        assert_eq!(by_pattern.clean_text("İx"), "***");
    }

    #[test]
    fn custom_mask_char() {
        let l = lex();
        let opts = RedactOptions {
            mask_char: '#',
            ..RedactOptions::default()
        };
        let r = Redactor::new(Matcher::new(&l, Thresholds::default()), opts);
        assert_eq!(r.clean_text("so bad"), "so ###");
    }
}
