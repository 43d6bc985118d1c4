//! Runtime event stream payloads.

use crate::{
    types::{BookId, BookStatus},
    view::CatalogFilter,
};

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryEvent {
    /// A book was added to the front of the catalog.
    BookAdded {
        /// New book id.
        id: BookId,
    },
    /// A book was borrowed or returned.
    StatusChanged {
        /// Toggled book id.
        id: BookId,
        /// Status after the toggle.
        status: BookStatus,
    },
    /// Search text or category selection changed.
    FiltersChanged {
        /// Filter now in effect.
        filter: CatalogFilter,
    },
    /// An add-book submission was rejected.
    ValidationFailed,
}
