//! Intent routing
//!
//! Maps an utterance to a handler by ordered substring matching. The first
//! keyword (in table order) contained in the utterance wins, even when a later
//! keyword is a longer or more specific match.

/// Result of routing an utterance against a [`CommandTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a, C> {
    /// A keyword matched; carries the keyword and its handler
    Matched {
        /// The keyword that matched
        keyword: &'a str,
        /// The handler registered for it
        handler: &'a C,
    },
    /// No keyword is contained in the utterance
    Unmatched,
}

impl<'a, C> Outcome<'a, C> {
    /// The matched handler, if any
    #[must_use]
    pub const fn handler(&self) -> Option<&'a C> {
        match self {
            Self::Matched { handler, .. } => Some(*handler),
            Self::Unmatched => None,
        }
    }

    /// Whether a keyword matched
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}

/// Ordered keyword → handler table
///
/// Insertion order is match priority. Keywords may overlap and may repeat;
/// a repeated keyword is shadowed by its first occurrence.
#[derive(Debug, Clone)]
pub struct CommandTable<C> {
    entries: Vec<(&'static str, C)>,
}

impl<C> Default for CommandTable<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C> CommandTable<C> {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, builder style
    #[must_use]
    pub fn with(mut self, keyword: &'static str, handler: C) -> Self {
        self.push(keyword, handler);
        self
    }

    /// Append an entry at the lowest priority
    pub fn push(&mut self, keyword: &'static str, handler: C) {
        self.entries.push((keyword, handler));
    }

    /// Keywords in priority order
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Route an utterance against this table
    #[must_use]
    pub fn route(&self, utterance: &str) -> Outcome<'_, C> {
        route(utterance, self)
    }
}

impl<C> FromIterator<(&'static str, C)> for CommandTable<C> {
    fn from_iter<I: IntoIterator<Item = (&'static str, C)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Find the first entry whose keyword is a substring of `utterance`
#[must_use]
pub fn route<'a, C>(utterance: &str, table: &'a CommandTable<C>) -> Outcome<'a, C> {
    table
        .entries
        .iter()
        .find(|(keyword, _)| utterance.contains(keyword))
        .map_or(Outcome::Unmatched, |(keyword, handler)| Outcome::Matched {
            keyword: *keyword,
            handler,
        })
}

/// Remove every occurrence of `keyword` from `utterance` and trim the rest
///
/// This is how handlers pull their argument out of the utterance
/// ("solve 2 + 2" → "2 + 2").
#[must_use]
pub fn strip_keyword(utterance: &str, keyword: &str) -> String {
    if keyword.is_empty() {
        return utterance.trim().to_string();
    }
    utterance.replace(keyword, "").trim().to_string()
}
