use serde::Serialize;

use crate::{
    book::{Book, HistoryEntry, PLACEHOLDER_IMAGE},
    types::{ALL_CATEGORIES, BookId, BookStatus},
};

/// Shown in place of the catalog when nothing matches.
pub const NO_BOOKS_MESSAGE: &str = "No books found.";
/// Shown in place of the history log when it is empty.
pub const NO_HISTORY_MESSAGE: &str = "No history yet.";

/// Active search text and category selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogFilter {
    pub query: String,
    pub category: String,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl CatalogFilter {
    pub fn render(&self, books: &[Book]) -> CatalogView {
        render_catalog(books, &self.query, &self.category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub class: &'static str,
}

impl From<BookStatus> for StatusBadge {
    fn from(status: BookStatus) -> Self {
        Self {
            label: status.as_str(),
            class: status.badge_class(),
        }
    }
}

/// Display model for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookCard {
    /// Book the action control targets.
    pub id: BookId,
    pub image: String,
    /// Swapped in by the display when `image` fails to load.
    pub fallback_image: &'static str,
    pub title: String,
    pub author: String,
    pub category: String,
    pub status: StatusBadge,
    /// `"Borrow"` or `"Return"`.
    pub action: &'static str,
}

impl From<&Book> for BookCard {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            image: book.cover().to_string(),
            fallback_image: PLACEHOLDER_IMAGE,
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            status: StatusBadge::from(book.status),
            action: book.status.action_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogView {
    Empty { message: &'static str },
    Cards(Vec<BookCard>),
}

impl CatalogView {
    /// Cards in display order; empty for the placeholder.
    pub fn cards(&self) -> &[BookCard] {
        match self {
            Self::Empty { .. } => &[],
            Self::Cards(cards) => cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HistoryView {
    Empty { message: &'static str },
    Lines(Vec<String>),
}

impl HistoryView {
    pub fn lines(&self) -> &[String] {
        match self {
            Self::Empty { .. } => &[],
            Self::Lines(lines) => lines,
        }
    }
}

/// True when `book` passes both the text query and the category filter.
///
/// `query_lower` must already be trimmed and lowercased. An empty category is
/// treated like [`ALL_CATEGORIES`].
pub fn matches(book: &Book, query_lower: &str, category: &str) -> bool {
    let matches_query = query_lower.is_empty()
        || book.title.to_lowercase().contains(query_lower)
        || book.author.to_lowercase().contains(query_lower);
    let matches_category =
        category.is_empty() || category == ALL_CATEGORIES || book.category == category;
    matches_query && matches_category
}

/// Books passing the filter, in collection order.
pub fn filter_books<'a>(books: &'a [Book], query: &str, category: &str) -> Vec<&'a Book> {
    let query_lower = query.trim().to_lowercase();
    books
        .iter()
        .filter(|book| matches(book, &query_lower, category))
        .collect()
}

pub fn render_catalog(books: &[Book], query: &str, category: &str) -> CatalogView {
    let filtered = filter_books(books, query, category);
    if filtered.is_empty() {
        return CatalogView::Empty {
            message: NO_BOOKS_MESSAGE,
        };
    }
    CatalogView::Cards(filtered.into_iter().map(BookCard::from).collect())
}

/// One `"<date> → <action>: <title>"` line per entry, newest first.
pub fn render_history(history: &[HistoryEntry]) -> HistoryView {
    if history.is_empty() {
        return HistoryView::Empty {
            message: NO_HISTORY_MESSAGE,
        };
    }
    HistoryView::Lines(history.iter().map(ToString::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::seed_catalog;

    #[test]
    fn empty_category_behaves_like_all() {
        let books = seed_catalog();
        assert_eq!(render_catalog(&books, "", ""), render_catalog(&books, "", ALL_CATEGORIES));
    }

    #[test]
    fn card_without_image_uses_placeholder() {
        let mut books = seed_catalog();
        books[0].image = None;
        let view = render_catalog(&books[..1], "", ALL_CATEGORIES);
        assert_eq!(view.cards()[0].image, PLACEHOLDER_IMAGE);
    }
}
