use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    app::Library,
    book::{Book, BookDraft, HistoryEntry},
    config::LibraryConfig,
    core::store::{LibrarySnapshot, ValidationError},
    types::{BookId, BookStatus},
    view::{CatalogFilter, CatalogView, HistoryView},
};

use super::events::LibraryEvent;

#[derive(Debug)]
pub enum RuntimeError {
    Validation(ValidationError),
    ChannelClosed,
}

impl From<ValidationError> for RuntimeError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Cloneable front end to a library owned by a single runtime task.
#[derive(Clone)]
pub struct LibraryHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<LibraryEvent>,
}

enum Command {
    Search {
        query: String,
        resp: oneshot::Sender<()>,
    },
    SetCategory {
        category: String,
        resp: oneshot::Sender<()>,
    },
    ClearFilters {
        resp: oneshot::Sender<()>,
    },
    AddBook {
        draft: BookDraft,
        resp: oneshot::Sender<Result<BookId, ValidationError>>,
    },
    ToggleBorrow {
        id: BookId,
        resp: oneshot::Sender<Option<BookStatus>>,
    },
    Books {
        resp: oneshot::Sender<Vec<Book>>,
    },
    History {
        resp: oneshot::Sender<Vec<HistoryEntry>>,
    },
    Filter {
        resp: oneshot::Sender<CatalogFilter>,
    },
    CatalogView {
        resp: oneshot::Sender<CatalogView>,
    },
    HistoryView {
        resp: oneshot::Sender<HistoryView>,
    },
    Shutdown {
        resp: oneshot::Sender<LibrarySnapshot>,
    },
}

/// Moves `library` onto a task that applies one command at a time.
///
/// The initial render happens on the task before the first command runs.
/// Must be called from within a tokio runtime.
pub fn spawn_library(library: Library, config: &LibraryConfig) -> LibraryHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<LibraryEvent>(config.event_queue_bound.max(1));

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut library = library;
        library.start();

        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(cmd, &mut library, &events_tx_loop);
            if done {
                return;
            }
        }
        tracing::debug!("library command channel closed");
    });

    LibraryHandle { cmd_tx, events_tx }
}

impl LibraryHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<LibraryEvent> {
        self.events_tx.subscribe()
    }

    pub async fn search(&self, query: impl Into<String>) -> Result<(), RuntimeError> {
        let query = query.into();
        self.request(|resp| Command::Search { query, resp }).await
    }

    pub async fn set_category(&self, category: impl Into<String>) -> Result<(), RuntimeError> {
        let category = category.into();
        self.request(|resp| Command::SetCategory { category, resp })
            .await
    }

    pub async fn clear_filters(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::ClearFilters { resp }).await
    }

    pub async fn add_book(&self, draft: BookDraft) -> Result<BookId, RuntimeError> {
        self.request(|resp| Command::AddBook { draft, resp })
            .await?
            .map_err(RuntimeError::from)
    }

    pub async fn toggle_borrow(&self, id: BookId) -> Result<Option<BookStatus>, RuntimeError> {
        self.request(|resp| Command::ToggleBorrow { id, resp }).await
    }

    pub async fn books(&self) -> Result<Vec<Book>, RuntimeError> {
        self.request(|resp| Command::Books { resp }).await
    }

    pub async fn history(&self) -> Result<Vec<HistoryEntry>, RuntimeError> {
        self.request(|resp| Command::History { resp }).await
    }

    pub async fn filter(&self) -> Result<CatalogFilter, RuntimeError> {
        self.request(|resp| Command::Filter { resp }).await
    }

    pub async fn catalog_view(&self) -> Result<CatalogView, RuntimeError> {
        self.request(|resp| Command::CatalogView { resp }).await
    }

    pub async fn history_view(&self) -> Result<HistoryView, RuntimeError> {
        self.request(|resp| Command::HistoryView { resp }).await
    }

    /// Stops the task and returns the final state. The library is dropped.
    pub async fn shutdown(&self) -> Result<LibrarySnapshot, RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    library: &mut Library,
    events_tx: &broadcast::Sender<LibraryEvent>,
) -> bool {
    match cmd {
        Command::Search { query, resp } => {
            library.search(query);
            emit_filters(library, events_tx);
            let _ = resp.send(());
        }
        Command::SetCategory { category, resp } => {
            library.set_category(category);
            emit_filters(library, events_tx);
            let _ = resp.send(());
        }
        Command::ClearFilters { resp } => {
            library.clear_filters();
            emit_filters(library, events_tx);
            let _ = resp.send(());
        }
        Command::AddBook { draft, resp } => {
            let res = library.submit_add_book(draft);
            let evt = match &res {
                Ok(id) => LibraryEvent::BookAdded { id: *id },
                Err(_) => LibraryEvent::ValidationFailed,
            };
            let _ = events_tx.send(evt);
            let _ = resp.send(res);
        }
        Command::ToggleBorrow { id, resp } => {
            let status = library.toggle_borrow(id);
            if let Some(status) = status {
                let _ = events_tx.send(LibraryEvent::StatusChanged { id, status });
            }
            let _ = resp.send(status);
        }
        Command::Books { resp } => {
            let _ = resp.send(library.store().books().to_vec());
        }
        Command::History { resp } => {
            let _ = resp.send(library.store().history().to_vec());
        }
        Command::Filter { resp } => {
            let _ = resp.send(library.filter().clone());
        }
        Command::CatalogView { resp } => {
            let _ = resp.send(library.catalog_view());
        }
        Command::HistoryView { resp } => {
            let _ = resp.send(library.history_view());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(library.store().export_snapshot());
            return true;
        }
    }

    false
}

fn emit_filters(library: &Library, events_tx: &broadcast::Sender<LibraryEvent>) {
    let _ = events_tx.send(LibraryEvent::FiltersChanged {
        filter: library.filter().clone(),
    });
}
