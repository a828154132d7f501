//! Search index data model
//!
//! These types mirror the `search.json` document shipped next to the generated
//! pages: `{ "results": [ { name_prelude, name, link, desc, kind }, ... ] }`.

use serde::{Deserialize, Serialize};

/// The kind of a searchable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    Class,
    Struct,
    Enum,
    Builtin,
    Function,
    Member,
    Constant,
    Enumerator,
    /// Any kind string this build does not know about.
    #[serde(other)]
    Unknown,
}

impl SearchKind {
    /// Ranking bonus added on top of the fuzzy score.
    ///
    /// Type-level entries win ties against the things declared inside them.
    pub fn rank_bonus(self) -> f64 {
        match self {
            SearchKind::Class | SearchKind::Struct | SearchKind::Enum | SearchKind::Builtin => 0.1,
            SearchKind::Function
            | SearchKind::Member
            | SearchKind::Constant
            | SearchKind::Enumerator
            | SearchKind::Unknown => 0.0,
        }
    }

    /// Lowercase label shown next to a search result.
    pub fn label(self) -> &'static str {
        match self {
            SearchKind::Class => "class",
            SearchKind::Struct => "struct",
            SearchKind::Enum => "enum",
            SearchKind::Builtin => "builtin",
            SearchKind::Function => "function",
            SearchKind::Member => "member",
            SearchKind::Constant => "constant",
            SearchKind::Enumerator => "enumerator",
            SearchKind::Unknown => "unknown",
        }
    }

    /// CSS class used to colour the entry name. Enumerators share the
    /// constant colour.
    pub fn css_class(self) -> &'static str {
        match self {
            SearchKind::Enumerator => "constant",
            other => other.label(),
        }
    }

    /// Whether this kind gets its own page (as opposed to an anchor on a
    /// parent page).
    pub fn is_type(self) -> bool {
        matches!(
            self,
            SearchKind::Class | SearchKind::Struct | SearchKind::Enum | SearchKind::Builtin
        )
    }
}

/// One searchable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Qualifying path shown before the name, including the trailing `.`
    /// (e.g. `"Actor."`), or empty for top-level items.
    pub name_prelude: String,
    /// The name matched against the query.
    pub name: String,
    /// Page-relative link to the item.
    pub link: String,
    /// Summary markup, generated at build time.
    pub desc: String,
    pub kind: SearchKind,
}

/// The full, read-only search index of a site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    #[serde(rename = "results")]
    pub entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn new(entries: Vec<SearchEntry>) -> Self {
        Self { entries }
    }

    /// Parse a `search.json` document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A matched entry with its adjusted score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub entry: SearchEntry,
    /// Fuzzy score plus [`SearchKind::rank_bonus`].
    pub score: f64,
    /// Sorted, deduplicated char offsets into `entry.name` that matched.
    pub positions: Vec<u32>,
}
