//! Book records, add-form drafts, and history entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{BookId, BookStatus, HistoryAction};

/// Inline SVG cover shown when a book has no image or its image fails to load.
pub const PLACEHOLDER_IMAGE: &str = concat!(
    "data:image/svg+xml;utf8,",
    "%3Csvg%20xmlns%3D'http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg'%20width%3D'400'%20height%3D'600'%3E",
    "%3Crect%20fill%3D'%232b2b2b'%20width%3D'100%25'%20height%3D'100%25'%2F%3E",
    "%3Ctext%20x%3D'50%25'%20y%3D'50%25'%20fill%3D'%239aa'%20font-size%3D'20'%20",
    "font-family%3D'Arial'%20text-anchor%3D'middle'%3ENo%20Image%3C%2Ftext%3E%3C%2Fsvg%3E",
);

/// Authoritative catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Stable identifier.
    pub id: BookId,
    /// Title, non-empty.
    pub title: String,
    /// Author, non-empty.
    pub author: String,
    /// Category, non-empty.
    pub category: String,
    /// Lending status.
    pub status: BookStatus,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Book {
    /// Cover to display, falling back to [`PLACEHOLDER_IMAGE`].
    pub fn cover(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// Raw add-book form input. Fields are trimmed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookDraft {
    /// Title field.
    pub title: String,
    /// Author field.
    pub author: String,
    /// Category field.
    pub category: String,
    /// Optional image URL field.
    pub image: Option<String>,
}

impl BookDraft {
    /// Draft without an image.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            category: category.into(),
            image: None,
        }
    }

    /// Sets the image URL field.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// One borrow/return record. The title is captured by value at the time of
/// the action and never follows later edits to the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// What happened.
    pub action: HistoryAction,
    /// Title snapshot.
    pub title: String,
    /// Formatted local timestamp.
    pub date: String,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}: {}", self.date, self.action, self.title)
    }
}

/// Built-in catalog used when nothing usable is persisted.
pub fn seed_catalog() -> Vec<Book> {
    let seed = [
        (
            1,
            "Atomic Habits",
            "James Clear",
            "Self-help",
            BookStatus::Available,
            "https://m.media-amazon.com/images/I/91bYsX41DVL.jpg",
        ),
        (
            2,
            "The Pragmatic Programmer",
            "Andrew Hunt",
            "Programming",
            BookStatus::Available,
            "https://m.media-amazon.com/images/I/81Apz7r0w-L.jpg",
        ),
        (
            3,
            "Clean Code",
            "Robert C. Martin",
            "Programming",
            BookStatus::Borrowed,
            "https://m.media-amazon.com/images/I/41xShlnTZTL.jpg",
        ),
        (
            4,
            "1984",
            "George Orwell",
            "Fiction",
            BookStatus::Available,
            "https://m.media-amazon.com/images/I/71kxa1-0mfL.jpg",
        ),
    ];

    seed.into_iter()
        .map(|(id, title, author, category, status, image)| Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            status,
            image: Some(image.to_string()),
        })
        .collect()
}
