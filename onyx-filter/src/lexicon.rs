//! Flagged-term lexicon.
//!
//! The builtin table is the embedded `assets/lexicon.toml`, parsed once on
//! first use and shared read-only for the life of the process. Custom tables
//! use the same TOML layout:
//!
//! ```toml
//! name = "my-list"
//! version = "1"
//!
//! [[groups]]
//! category = "general"
//! terms = ["foo", "bar"]
//! ```

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::assets::LEXICON_TOML;
use crate::error::LexiconError;
use crate::normalize::fold_case;
use crate::types::Category;

/// One flagged surface form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    term: String,
    folded: String,
    len: usize,
    category: Category,
}

impl Entry {
    pub fn new(term: impl Into<String>, category: Category) -> Self {
        let term = term.into();
        let folded = fold_case(&term);
        let len = folded.chars().count();
        Self { term, folded, len, category }
    }

    /// The term as declared.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Lower-cased form used for comparison.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Length in chars of the folded form.
    pub fn char_len(&self) -> usize {
        self.len
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lexicon {
    name: String,
    version: String,
    description: Option<String>,
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    groups: Vec<TermGroup>,
}

#[derive(Debug, Deserialize)]
struct TermGroup {
    category: Category,
    #[serde(default)]
    terms: Vec<String>,
}

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| match Lexicon::from_toml_str(LEXICON_TOML) {
    Ok(lexicon) => lexicon,
    Err(e) => {
        tracing::error!(error = %e, "embedded lexicon failed to parse; nothing will be flagged");
        Lexicon::empty()
    }
});

/// The process-wide builtin lexicon.
pub fn builtin() -> &'static Lexicon {
    &BUILTIN
}

impl Lexicon {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a lexicon from TOML. Group order, then term order, is preserved.
    pub fn from_toml_str(text: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = toml::from_str(text)?;
        let mut entries = Vec::new();
        for group in file.groups {
            for (index, term) in group.terms.into_iter().enumerate() {
                if term.trim().is_empty() {
                    return Err(LexiconError::BlankTerm {
                        category: group.category.to_string(),
                        index,
                    });
                }
                entries.push(Entry::new(term, group.category));
            }
        }
        Ok(Self {
            name: file.name,
            version: file.version,
            description: file.description,
            entries,
        })
    }

    /// Build an ad-hoc lexicon from `(term, category)` pairs. Blank terms are skipped.
    pub fn from_terms<I, S>(name: &str, terms: I) -> Self
    where
        I: IntoIterator<Item = (S, Category)>,
        S: Into<String>,
    {
        let entries = terms
            .into_iter()
            .map(|(t, c)| Entry::new(t, c))
            .filter(|e| !e.term.trim().is_empty())
            .collect();
        Self {
            name: name.to_string(),
            version: String::new(),
            description: None,
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(Entry::term)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
