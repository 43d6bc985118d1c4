//! Command handlers tying user intents to store mutations and render passes.

use crate::{
    book::BookDraft,
    core::{
        categories::CategorySet,
        store::{LibraryStore, ValidationError},
    },
    types::{ALL_CATEGORIES, BookId, BookStatus},
    view::{
        CatalogFilter, CatalogView, DisplaySink, HistoryView,
        render::{render_catalog, render_history},
    },
};

/// A store, its active filter, and the display the results go to.
pub struct Library {
    store: LibraryStore,
    filter: CatalogFilter,
    sink: Box<dyn DisplaySink>,
}

impl Library {
    pub fn new(store: LibraryStore, sink: Box<dyn DisplaySink>) -> Self {
        Self {
            store,
            filter: CatalogFilter::default(),
            sink,
        }
    }

    /// Initial render of both the catalog and the history log.
    pub fn start(&mut self) {
        self.render_catalog();
        self.render_history();
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.render_catalog();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.filter.category = category.into();
        self.render_catalog();
    }

    pub fn clear_filters(&mut self) {
        self.filter.query.clear();
        self.filter.category = ALL_CATEGORIES.to_string();
        self.render_catalog();
    }

    /// Handles an add-book form submission.
    ///
    /// On success the catalog is re-rendered and the host should reset the
    /// form. On failure the sink receives an alert and nothing else changes.
    pub fn submit_add_book(&mut self, draft: BookDraft) -> Result<BookId, ValidationError> {
        match self.store.add_book(draft) {
            Ok(id) => {
                self.render_catalog();
                Ok(id)
            }
            Err(err) => {
                self.sink.alert(&err.to_string());
                Err(err)
            }
        }
    }

    /// Handles a Borrow/Return click. Both views are re-rendered when the
    /// book exists; an unknown id renders nothing.
    pub fn toggle_borrow(&mut self, id: BookId) -> Option<BookStatus> {
        let status = self.store.toggle_borrow(id)?;
        self.render_catalog();
        self.render_history();
        Some(status)
    }

    pub fn catalog_view(&self) -> CatalogView {
        self.filter.render(self.store.books())
    }

    pub fn history_view(&self) -> HistoryView {
        render_history(self.store.history())
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn store(&self) -> &LibraryStore {
        &self.store
    }

    pub fn categories(&self) -> &CategorySet {
        self.store.categories()
    }

    /// Ends the library's lifetime, returning the store and the sink.
    pub fn into_parts(self) -> (LibraryStore, Box<dyn DisplaySink>) {
        (self.store, self.sink)
    }

    fn render_catalog(&mut self) {
        let view = render_catalog(
            self.store.books(),
            &self.filter.query,
            &self.filter.category,
        );
        self.sink.show_catalog(&view);
    }

    fn render_history(&mut self) {
        let view = render_history(self.store.history());
        self.sink.show_history(&view);
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("store", &self.store)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}
