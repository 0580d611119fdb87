use serde::{Deserialize, Serialize};
use std::fmt;

/// Informational grouping of lexicon entries. Never affects matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Classic,
    FamilyHonor,
    Sexual,
    Religious,
    General,
    Bypass,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Classic,
        Category::FamilyHonor,
        Category::Sexual,
        Category::Religious,
        Category::General,
        Category::Bypass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Classic => "classic",
            Category::FamilyHonor => "family_honor",
            Category::Sexual => "sexual",
            Category::Religious => "religious",
            Category::General => "general",
            Category::Bypass => "bypass",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which matcher path flagged the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// A token equals the entry.
    Exact,
    /// A long token contains a long entry.
    Substring,
    /// Found only after separators were stripped from the whole text.
    Bypass,
}

/// Detailed outcome of screening one text.
///
/// `toxic` is the same boolean `is_toxic` returns; the remaining fields name
/// the first entry that matched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Screening {
    pub toxic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MatchKind>,
}

impl Screening {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn flagged(term: &str, category: Category, kind: MatchKind) -> Self {
        Self {
            toxic: true,
            term: Some(term.to_string()),
            category: Some(category),
            kind: Some(kind),
        }
    }
}
