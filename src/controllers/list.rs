//! # List-State Controller
//!
//! The controller behind every admin list screen (projects, experiences, articles). It
//! owns the collection, the loading and error flags, the search overlay and the reorder
//! state, and publishes a [`ListView`] snapshot after every message it handles.
//!
//! ## Concurrency Model
//!
//! The controller is an actor. UI commands (sent through a [`ListHandle`]) and the
//! completions of the HTTP requests it spawned arrive in the same mailbox and are processed
//! one at a time, so the state needs no lock. Requests run in their own tasks and report
//! back; none of them touches the state directly.
//!
//! Loads and searches carry a sequence number. A completion whose number is not the latest
//! issued is stale and dropped, so the view always reflects the most recently *requested*
//! operation rather than the most recently *arrived* response.
//!
//! ## Usage Pattern
//!
//! ```rust,ignore
//! let (controller, handle) = ListController::new(client, SearchSettings::default(), 32);
//! tokio::spawn(controller.run(ctx));
//!
//! let mut state = handle.subscribe();
//! state.borrow_and_update();
//! handle.load().await?;
//! state.changed().await?;
//! let view = state.wait_for(|v| !v.loading).await?;
//! ```

use crate::controllers::reorder::{move_item, ordered_ids, sort_for_display, Direction};
use crate::controllers::search::{
    classify, debounce_distinct, QueryInput, QueryIntent, SearchSettings, SearchState,
};
use crate::framework::{
    dispose_pair, ApiResult, ControllerContext, ControllerError, DisposeHandle, DisposeSignal,
    Notice, Resource, ResourceApi, ResourceId, SearchResult,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

// =============================================================================
// VIEW STATE
// =============================================================================

/// Snapshot of a list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub loading: bool,
    /// User-facing message of the last failed load. Cleared when a load starts.
    pub error: Option<String>,
    pub reordering: bool,
    pub status_filter: Option<String>,
    pub search: SearchState,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            reordering: false,
            status_filter: None,
            search: SearchState::default(),
        }
    }
}

impl<T: Resource> ListView<T> {
    /// True only for a settled, successful, empty load.
    pub fn has_no_items(&self) -> bool {
        !self.loading && self.error.is_none() && self.items.is_empty()
    }

    /// Items narrowed by the active search and the status filter.
    pub fn visible(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| !self.search.is_search_active || self.search.contains(item.id()))
            .filter(|item| match &self.status_filter {
                Some(status) => item.status() == Some(status.as_str()),
                None => true,
            })
            .collect()
    }

    /// An active search that matched nothing visible.
    pub fn has_no_results(&self) -> bool {
        self.search.is_search_active && self.visible().is_empty()
    }

    pub fn can_reorder(&self) -> bool {
        T::ORDERABLE && !self.loading && !self.reordering && !self.search.is_search_active
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

#[derive(Debug)]
enum Msg<T: Resource> {
    Load,
    SetStatusFilter(Option<String>),
    QueryTyped(String),
    QuerySettled(String),
    ClearSearch,
    Move { index: usize, direction: Direction },
    Delete(ResourceId),
    Loaded { seq: u64, result: ApiResult<Vec<T>> },
    Searched { seq: u64, result: ApiResult<Vec<SearchResult>> },
    Reordered { result: ApiResult<()> },
    DeleteFinished { id: ResourceId, name: String, result: ApiResult<()> },
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// The actor half of a list screen.
pub struct ListController<T: Resource> {
    api: Arc<dyn ResourceApi<T>>,
    settings: SearchSettings,
    view: ListView<T>,
    load_seq: u64,
    search_seq: u64,
    mailbox: mpsc::Sender<Msg<T>>,
    receiver: mpsc::Receiver<Msg<T>>,
    queries: mpsc::UnboundedSender<QueryInput>,
    query_input: Option<mpsc::UnboundedReceiver<QueryInput>>,
    state: watch::Sender<ListView<T>>,
    signal: DisposeSignal,
}

impl<T: Resource> ListController<T> {
    /// Creates the controller and its handle. The controller does nothing until `run`.
    pub fn new(
        api: impl ResourceApi<T>,
        settings: SearchSettings,
        capacity: usize,
    ) -> (Self, ListHandle<T>) {
        let (mailbox, receiver) = mpsc::channel(capacity.max(1));
        let (queries, query_input) = mpsc::unbounded_channel();
        let (state, observer) = watch::channel(ListView::default());
        let (dispose, signal) = dispose_pair();

        let controller = Self {
            api: Arc::new(api),
            settings,
            view: ListView::default(),
            load_seq: 0,
            search_seq: 0,
            mailbox: mailbox.clone(),
            receiver,
            queries,
            query_input: Some(query_input),
            state,
            signal,
        };
        let handle = ListHandle {
            sender: mailbox,
            state: observer,
            dispose: Arc::new(dispose),
        };
        (controller, handle)
    }

    /// Runs the event loop until the handle disposes the controller.
    pub async fn run(mut self, ctx: ControllerContext) {
        let resource = T::PATH;
        info!(resource, "Controller started");

        if let Some(input) = self.query_input.take() {
            self.signal.spawn(debounce_distinct(
                input,
                self.mailbox.clone(),
                self.settings.debounce,
                Msg::QuerySettled,
            ));
        }

        let mut signal = self.signal.clone();
        loop {
            let msg = tokio::select! {
                biased;
                _ = signal.disposed() => break,
                msg = self.receiver.recv() => match msg {
                    Some(msg) => msg,
                    None => break,
                },
            };
            self.handle(msg, &ctx);
            self.state.send_replace(self.view.clone());
        }

        info!(resource, items = self.view.items.len(), "Controller disposed");
    }

    fn handle(&mut self, msg: Msg<T>, ctx: &ControllerContext) {
        let resource = T::PATH;
        match msg {
            Msg::Load => self.load(),
            Msg::Loaded { seq, result } => {
                if seq != self.load_seq {
                    debug!(resource, seq, latest = self.load_seq, "Stale load dropped");
                    return;
                }
                self.view.loading = false;
                match result {
                    Ok(mut items) => {
                        sort_for_display(&mut items);
                        info!(resource, count = items.len(), "Loaded");
                        self.view.items = items;
                    }
                    Err(e) => {
                        error!(resource, error = %e, status = ?e.status(), "Load failed");
                        self.view.error = Some(Notice::LoadFailed { resource }.to_string());
                    }
                }
            }
            Msg::SetStatusFilter(status) => {
                debug!(resource, ?status, "Status filter");
                self.view.status_filter = status;
            }
            Msg::QueryTyped(query) => {
                self.view.search.query = query.clone();
                let _ = self.queries.send(QueryInput::Query(query));
            }
            Msg::QuerySettled(query) => {
                // Settled before a clear that has since emptied the box.
                if query != self.view.search.query {
                    debug!(resource, %query, "Outdated query dropped");
                    return;
                }
                match classify(&query, self.settings.min_length) {
                    QueryIntent::Search(term) => self.search(term),
                    QueryIntent::Clear => self.clear_search(),
                    QueryIntent::Hold => debug!(resource, %query, "Query too short, holding"),
                }
            }
            Msg::ClearSearch => {
                self.clear_search();
                self.view.search.query.clear();
                let _ = self.queries.send(QueryInput::Reset);
            }
            Msg::Searched { seq, result } => {
                if seq != self.search_seq {
                    debug!(resource, seq, latest = self.search_seq, "Stale search dropped");
                    return;
                }
                self.view.search.is_searching = false;
                match result {
                    Ok(results) => {
                        debug!(resource, hits = results.len(), "Search done");
                        self.view.search.results = results;
                        self.view.search.is_search_active = true;
                    }
                    Err(e) => {
                        error!(resource, error = %e, status = ?e.status(), "Search failed");
                        ctx.notifier.notify(Notice::SearchFailed);
                    }
                }
            }
            Msg::Move { index, direction } => self.reorder(index, direction, ctx),
            Msg::Reordered { result } => {
                self.view.reordering = false;
                match result {
                    Ok(()) => {
                        info!(resource, "Order saved");
                        ctx.notifier.notify(Notice::OrderSaved);
                    }
                    Err(e) => {
                        error!(resource, error = %e, status = ?e.status(), "Reorder failed, reloading");
                        ctx.notifier.notify(Notice::ReorderFailed);
                        self.load();
                    }
                }
            }
            Msg::Delete(id) => self.request_delete(id, ctx),
            Msg::DeleteFinished { id, name, result } => match result {
                Ok(()) => {
                    self.view.items.retain(|item| item.id() != id);
                    self.view.search.results.retain(|hit| hit.id != id);
                    info!(resource, id, size = self.view.items.len(), "Deleted");
                    ctx.notifier.notify(Notice::Deleted { name });
                }
                Err(e) => {
                    error!(resource, id, error = %e, status = ?e.status(), "Delete failed");
                    ctx.notifier.notify(Notice::DeleteFailed { name });
                }
            },
        }
    }

    fn load(&mut self) {
        self.load_seq += 1;
        let seq = self.load_seq;
        self.view.loading = true;
        self.view.error = None;
        debug!(resource = T::PATH, seq, "Load");

        let api = self.api.clone();
        let mailbox = self.mailbox.clone();
        self.signal.spawn(async move {
            let result = api.list().await;
            let _ = mailbox.send(Msg::Loaded { seq, result }).await;
        });
    }

    fn search(&mut self, term: String) {
        self.search_seq += 1;
        let seq = self.search_seq;
        self.view.search.is_searching = true;
        debug!(resource = T::PATH, seq, %term, "Search");

        let api = self.api.clone();
        let mailbox = self.mailbox.clone();
        self.signal.spawn(async move {
            let result = api.search(&term).await;
            let _ = mailbox.send(Msg::Searched { seq, result }).await;
        });
    }

    fn clear_search(&mut self) {
        // Invalidates any search still in flight.
        self.search_seq += 1;
        self.view.search.deactivate();
    }

    fn reorder(&mut self, index: usize, direction: Direction, ctx: &ControllerContext) {
        let resource = T::PATH;
        if ctx.demo_blocks() {
            return;
        }
        if !self.view.can_reorder() {
            debug!(
                resource,
                index,
                loading = self.view.loading,
                reordering = self.view.reordering,
                searching = self.view.search.is_search_active,
                "Reorder ignored"
            );
            return;
        }
        if !move_item(&mut self.view.items, index, direction) {
            debug!(resource, index, ?direction, "Reorder out of bounds");
            return;
        }

        let ids = ordered_ids(&self.view.items);
        self.view.reordering = true;
        debug!(resource, ?ids, "Reorder");

        let api = self.api.clone();
        let mailbox = self.mailbox.clone();
        self.signal.spawn(async move {
            let result = api.reorder(&ids).await;
            let _ = mailbox.send(Msg::Reordered { result }).await;
        });
    }

    fn request_delete(&mut self, id: ResourceId, ctx: &ControllerContext) {
        let Some(item) = self.view.items.iter().find(|item| item.id() == id) else {
            warn!(resource = T::PATH, id, "Delete requested for unknown item");
            return;
        };
        let name = item.label();
        let locked = ctx.demo.is_active();
        let gate = ctx.gate.clone();
        let api = self.api.clone();
        let mailbox = self.mailbox.clone();

        self.signal.spawn(async move {
            if !gate.confirm_delete(&name, locked).await.is_confirmed() {
                debug!(resource = T::PATH, id, "Delete cancelled");
                return;
            }
            let result = api.delete(id).await;
            let _ = mailbox.send(Msg::DeleteFinished { id, name, result }).await;
        });
    }
}

// =============================================================================
// HANDLE
// =============================================================================

/// The client half of a list screen. Cheap to clone.
///
/// Dropping the last handle disposes the controller, as does calling [`ListHandle::dispose`].
pub struct ListHandle<T: Resource> {
    sender: mpsc::Sender<Msg<T>>,
    state: watch::Receiver<ListView<T>>,
    dispose: Arc<DisposeHandle>,
}

impl<T: Resource> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            state: self.state.clone(),
            dispose: self.dispose.clone(),
        }
    }
}

impl<T: Resource> ListHandle<T> {
    async fn send(&self, msg: Msg<T>) -> Result<(), ControllerError> {
        self.sender.send(msg).await.map_err(|_| ControllerError::Closed)
    }

    /// Reloads the collection, clearing any previous error.
    pub async fn load(&self) -> Result<(), ControllerError> {
        self.send(Msg::Load).await
    }

    pub async fn retry(&self) -> Result<(), ControllerError> {
        self.load().await
    }

    pub async fn set_status_filter(&self, status: Option<String>) -> Result<(), ControllerError> {
        self.send(Msg::SetStatusFilter(status)).await
    }

    /// Feeds the search box. Searches fire after the debounce interval.
    pub async fn search_input(&self, query: impl Into<String>) -> Result<(), ControllerError> {
        self.send(Msg::QueryTyped(query.into())).await
    }

    /// Escape key: resets the query and deactivates the overlay immediately.
    pub async fn clear_search(&self) -> Result<(), ControllerError> {
        self.send(Msg::ClearSearch).await
    }

    pub async fn move_up(&self, index: usize) -> Result<(), ControllerError> {
        self.send(Msg::Move { index, direction: Direction::Up }).await
    }

    pub async fn move_down(&self, index: usize) -> Result<(), ControllerError> {
        self.send(Msg::Move { index, direction: Direction::Down }).await
    }

    /// Asks for confirmation, then deletes the item.
    pub async fn delete(&self, id: ResourceId) -> Result<(), ControllerError> {
        self.send(Msg::Delete(id)).await
    }

    /// Latest published snapshot.
    pub fn view(&self) -> ListView<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListView<T>> {
        self.state.clone()
    }

    /// Waits for the first snapshot satisfying `predicate`.
    pub async fn wait_until(
        &self,
        predicate: impl FnMut(&ListView<T>) -> bool,
    ) -> Result<ListView<T>, ControllerError> {
        let mut state = self.state.clone();
        let view = state.wait_for(predicate).await.map_err(|_| ControllerError::Closed)?;
        Ok(view.clone())
    }

    pub fn dispose(&self) {
        self.dispose.dispose();
    }
}
