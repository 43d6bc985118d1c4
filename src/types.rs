//! Shared primitive IDs and status enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique book identifier.
pub type BookId = u64;

/// Category filter value that matches every book.
pub const ALL_CATEGORIES: &str = "All";

/// Lending status of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookStatus {
    /// On the shelf.
    #[default]
    Available,
    /// Lent out.
    Borrowed,
}

impl BookStatus {
    /// Returns the other status.
    pub fn toggled(self) -> Self {
        match self {
            Self::Available => Self::Borrowed,
            Self::Borrowed => Self::Available,
        }
    }

    /// Label of the control that flips this status.
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Available => "Borrow",
            Self::Borrowed => "Return",
        }
    }

    /// Badge class used by the display layer.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Borrowed => "borrowed",
        }
    }

    /// Plain label, matching the persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Borrowed => "Borrowed",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of lending action recorded in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryAction {
    /// The book went out.
    Borrowed,
    /// The book came back.
    Returned,
}

impl HistoryAction {
    /// Action implied by a book reaching `status`.
    pub fn for_new_status(status: BookStatus) -> Self {
        match status {
            BookStatus::Borrowed => Self::Borrowed,
            BookStatus::Available => Self::Returned,
        }
    }

    /// Plain label, matching the persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Borrowed => "Borrowed",
            Self::Returned => "Returned",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
