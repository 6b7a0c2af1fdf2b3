//! Shared value types for board results.

use serde::{Deserialize, Serialize};

/// One entry of a query batch.
///
/// `request` echoes the query string the script chose to report, which is
/// not necessarily the input verbatim (scripts may normalize it).
/// `response` is the script's message for that entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEntry {
    /// Whether the script answered this query.
    pub success: bool,
    /// The query as reported back by the script.
    pub request: String,
    /// The script's message for this query.
    pub response: String,
}

/// Position of the history cursor.
///
/// `Live` means the board is at the present: successful moves append to the
/// logs. A concrete index means the board is browsing past state; the index
/// is zero-based into the request/response logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCursor {
    /// Not browsing; operations mutate live state.
    Live,
    /// Browsing the round trip at this zero-based index.
    At(usize),
}

impl HistoryCursor {
    /// Returns true when the board is at the present.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, HistoryCursor::Live)
    }

    /// Returns the browsing index, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            HistoryCursor::Live => None,
            HistoryCursor::At(i) => Some(*i),
        }
    }
}

impl std::fmt::Display for HistoryCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryCursor::Live => write!(f, "live"),
            HistoryCursor::At(i) => write!(f, "{i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_accessors() {
        assert!(HistoryCursor::Live.is_live());
        assert_eq!(HistoryCursor::Live.index(), None);
        assert!(!HistoryCursor::At(3).is_live());
        assert_eq!(HistoryCursor::At(3).index(), Some(3));
    }

    #[test]
    fn cursor_display() {
        assert_eq!(HistoryCursor::Live.to_string(), "live");
        assert_eq!(HistoryCursor::At(7).to_string(), "7");
    }
}
