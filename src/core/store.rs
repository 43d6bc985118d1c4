use std::fmt::{self, Write as _};

use chrono::NaiveDateTime;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::{
    book::{Book, BookDraft, HistoryEntry, PLACEHOLDER_IMAGE, seed_catalog},
    clock::{Clock, SystemClock},
    config::{DEFAULT_DATE_FORMAT, LibraryConfig},
    core::categories::CategorySet,
    persist::{KvStorage, PersistenceAdapter},
    types::{BookId, BookStatus, HistoryAction},
};

/// Add-form field that must not be blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    Author,
    Category,
}

/// Rejected add-book input. Nothing was changed or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

impl ValidationError {
    /// Notice shown to the user.
    pub const MESSAGE: &'static str = "Please fill Title, Author and Category.";
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::MESSAGE)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    pub books: Vec<Book>,
    pub history: Vec<HistoryEntry>,
}

/// Owns the catalog and history log and writes both through on every mutation.
pub struct LibraryStore {
    books: Vec<Book>,
    history: Vec<HistoryEntry>,
    categories: CategorySet,
    adapter: PersistenceAdapter,
    clock: Box<dyn Clock>,
    books_key: String,
    history_key: String,
    date_format: String,
    last_id: BookId,
}

impl LibraryStore {
    /// Initializes from `storage` using the system clock.
    pub fn open(storage: impl KvStorage + 'static, config: &LibraryConfig) -> Self {
        Self::initialize(
            PersistenceAdapter::new(Box::new(storage)),
            Box::new(SystemClock),
            config,
        )
    }

    /// Loads persisted state, falling back to the seed catalog when the book
    /// list is missing or unreadable and to an empty log for history.
    pub fn initialize(
        adapter: PersistenceAdapter,
        clock: Box<dyn Clock>,
        config: &LibraryConfig,
    ) -> Self {
        let loaded_books = adapter.load::<Vec<Book>>(&config.books_key);
        let seeded = loaded_books.is_none();
        let books = loaded_books.unwrap_or_else(seed_catalog);
        let history = adapter
            .load::<Vec<HistoryEntry>>(&config.history_key)
            .unwrap_or_default();

        tracing::debug!(
            books = books.len(),
            history = history.len(),
            seeded,
            "library state initialized"
        );

        Self::from_parts(
            LibrarySnapshot { books, history },
            adapter,
            clock,
            config,
        )
    }

    /// Adopts `snapshot` as-is without reading storage.
    pub fn from_snapshot(
        snapshot: LibrarySnapshot,
        adapter: PersistenceAdapter,
        clock: Box<dyn Clock>,
        config: &LibraryConfig,
    ) -> Self {
        Self::from_parts(snapshot, adapter, clock, config)
    }

    fn from_parts(
        snapshot: LibrarySnapshot,
        adapter: PersistenceAdapter,
        clock: Box<dyn Clock>,
        config: &LibraryConfig,
    ) -> Self {
        let categories = CategorySet::from_books(&snapshot.books);
        let last_id = snapshot.books.iter().map(|b| b.id).max().unwrap_or(0);
        Self {
            books: snapshot.books,
            history: snapshot.history,
            categories,
            adapter,
            clock,
            books_key: config.books_key.clone(),
            history_key: config.history_key.clone(),
            date_format: config.date_format.clone(),
            last_id,
        }
    }

    pub fn export_snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            books: self.books.clone(),
            history: self.history.clone(),
        }
    }

    /// Ends the store's lifetime, handing back its collections.
    pub fn into_snapshot(self) -> LibrarySnapshot {
        LibrarySnapshot {
            books: self.books,
            history: self.history,
        }
    }

    /// Validates `draft`, prepends the new book, and persists.
    pub fn add_book(&mut self, draft: BookDraft) -> Result<BookId, ValidationError> {
        let title = draft.title.trim();
        let author = draft.author.trim();
        let category = draft.category.trim();

        let missing: Vec<RequiredField> = [
            (title, RequiredField::Title),
            (author, RequiredField::Author),
            (category, RequiredField::Category),
        ]
        .into_iter()
        .filter(|(value, _)| value.is_empty())
        .map(|(_, field)| field)
        .collect();
        if !missing.is_empty() {
            tracing::debug!(?missing, "add book rejected");
            return Err(ValidationError { missing });
        }

        let image = draft
            .image
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE);

        let id = self.next_id();
        let book = Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            status: BookStatus::Available,
            image: Some(image.to_string()),
        };

        if self.categories.insert(&book.category) {
            tracing::debug!(category = %book.category, "category registered");
        }
        tracing::info!(id, title = %book.title, "book added");
        self.books.insert(0, book);
        self.persist();
        Ok(id)
    }

    /// Flips the status of `id` and logs the action. `None` when no such book.
    pub fn toggle_borrow(&mut self, id: BookId) -> Option<BookStatus> {
        let Some(book) = self.books.iter_mut().find(|b| b.id == id) else {
            tracing::debug!(id, "toggle ignored for unknown book");
            return None;
        };

        book.status = book.status.toggled();
        let status = book.status;
        let entry = HistoryEntry {
            action: HistoryAction::for_new_status(status),
            title: book.title.clone(),
            date: format_date(self.clock.now(), &self.date_format),
        };

        tracing::info!(id, %status, "book status changed");
        self.history.insert(0, entry);
        self.persist();
        Some(status)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    fn persist(&mut self) {
        self.adapter.save(&self.books_key, &self.books);
        self.adapter.save(&self.history_key, &self.history);
    }

    fn next_id(&mut self) -> BookId {
        let now_ms = u64::try_from(self.clock.now().and_utc().timestamp_millis()).unwrap_or(0);
        match self.last_id.checked_add(1) {
            Some(floor) => {
                let id = now_ms.max(floor);
                self.last_id = id;
                id
            }
            None => self.lowest_unused_id(),
        }
    }

    /// Smallest positive id not held by any book. Used once ids reach `BookId::MAX`.
    fn lowest_unused_id(&self) -> BookId {
        let taken: HashSet<BookId> = self.books.iter().map(|b| b.id).collect();
        (1..=BookId::MAX).find(|id| !taken.contains(id)).unwrap_or(0)
    }
}

impl fmt::Debug for LibraryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryStore")
            .field("books", &self.books.len())
            .field("history", &self.history.len())
            .field("categories", &self.categories)
            .field("last_id", &self.last_id)
            .finish_non_exhaustive()
    }
}

/// Formats `at` with `pattern`, falling back to the default pattern when
/// `pattern` is not a valid strftime string.
fn format_date(at: NaiveDateTime, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", at.format(DEFAULT_DATE_FORMAT));
    }
    out
}
