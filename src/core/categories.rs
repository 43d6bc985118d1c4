use hashbrown::HashSet;

use crate::{book::Book, types::ALL_CATEGORIES};

/// Categories offered by a fresh library, before any book is added.
pub const BUILTIN_CATEGORIES: [&str; 3] = ["Programming", "Fiction", "Self-help"];

/// Insertion-ordered set of known categories.
///
/// [`ALL_CATEGORIES`] is a filter value, not a category, and is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    order: Vec<String>,
    known: HashSet<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in categories followed by any others found in `books`.
    pub fn from_books(books: &[Book]) -> Self {
        let mut set = Self::new();
        for name in BUILTIN_CATEGORIES {
            set.insert(name);
        }
        for book in books {
            set.insert(&book.category);
        }
        set
    }

    /// Registers `name`. Returns true when it was not known before.
    pub fn insert(&mut self, name: &str) -> bool {
        if name.is_empty() || name == ALL_CATEGORIES || self.known.contains(name) {
            return false;
        }
        self.known.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Values for a category filter control: `"All"` then every category.
    pub fn filter_options(&self) -> Vec<&str> {
        std::iter::once(ALL_CATEGORIES).chain(self.iter()).collect()
    }
}
