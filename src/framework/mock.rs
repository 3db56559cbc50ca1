//! # Mock Framework
//!
//! Utilities for testing controllers without a server.
//!
//! [`MockApi`] implements [`ResourceApi`] from a queue of scripted expectations. Every call
//! pops the next expectation; a call that does not match it panics. Calls are recorded so
//! tests can assert on payloads (the id sequence of a reorder, the text of a search).
//!
//! ```ignore
//! let mock = MockApi::<Project>::new();
//! mock.expect_list().return_ok(vec![project(1), project(2)]);
//! mock.expect_reorder().return_err(ApiError::Status { operation: "reorder", status: 500 });
//!
//! let (controller, handle) = ListController::new(mock.clone(), SearchSettings::default(), 32);
//! tokio::spawn(controller.run(ctx));
//! // drive the handle...
//! mock.verify(); // every expectation consumed
//! ```

use crate::framework::api::ResourceApi;
use crate::framework::confirm::{ConfirmDialog, Dismissal, ModalPrompt};
use crate::framework::error::{ApiError, ApiResult};
use crate::framework::feedback::{Notice, Notifier};
use crate::framework::platform::{Browser, FileSaver};
use crate::framework::resource::{Resource, ResourceId, SearchResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// EXPECTATIONS
// =============================================================================

/// A call observed by [`MockApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(ResourceId),
    Create,
    Update(ResourceId),
    Delete(ResourceId),
    Reorder(Vec<ResourceId>),
    Search(String),
}

enum Expectation<T: Resource> {
    List(ApiResult<Vec<T>>),
    Get(ResourceId, ApiResult<T>),
    Create(ApiResult<T>),
    Update(ResourceId, ApiResult<T>),
    Delete(ResourceId, ApiResult<()>),
    Reorder(ApiResult<()>),
    Search(ApiResult<Vec<SearchResult>>),
}

struct Scripted<T: Resource> {
    expectation: Expectation<T>,
    delay: Option<Duration>,
}

type Queue<T> = Arc<Mutex<VecDeque<Scripted<T>>>>;

/// A mock resource client with expectation tracking.
pub struct MockApi<T: Resource> {
    expectations: Queue<T>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl<T: Resource> Clone for MockApi<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<T: Resource> Default for MockApi<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> MockApi<T> {
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn expect_list(&self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Box::new(Expectation::List))
    }

    pub fn expect_get(&self, id: ResourceId) -> ExpectationBuilder<T, T> {
        self.builder(Box::new(move |r| Expectation::Get(id, r)))
    }

    pub fn expect_create(&self) -> ExpectationBuilder<T, T> {
        self.builder(Box::new(Expectation::Create))
    }

    pub fn expect_update(&self, id: ResourceId) -> ExpectationBuilder<T, T> {
        self.builder(Box::new(move |r| Expectation::Update(id, r)))
    }

    pub fn expect_delete(&self, id: ResourceId) -> ExpectationBuilder<T, ()> {
        self.builder(Box::new(move |r| Expectation::Delete(id, r)))
    }

    pub fn expect_reorder(&self) -> ExpectationBuilder<T, ()> {
        self.builder(Box::new(Expectation::Reorder))
    }

    pub fn expect_search(&self) -> ExpectationBuilder<T, Vec<SearchResult>> {
        self.builder(Box::new(Expectation::Search))
    }

    fn builder<R>(&self, wrap: Box<dyn FnOnce(ApiResult<R>) -> Expectation<T> + Send>) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            delay: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    async fn next(&self, call: Call) -> Expectation<T> {
        lock(&self.calls).push(call.clone());
        let scripted = lock(&self.expectations).pop_front();
        let Some(scripted) = scripted else {
            panic!("Unexpected request: {call:?}");
        };
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.expectation
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: Resource, R> {
    wrap: Box<dyn FnOnce(ApiResult<R>) -> Expectation<T> + Send>,
    delay: Option<Duration>,
    expectations: Queue<T>,
}

impl<T: Resource, R> ExpectationBuilder<T, R> {
    /// Delays the response, to simulate a slow server.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: ApiResult<R>) {
        let expectation = (self.wrap)(response);
        lock(&self.expectations).push_back(Scripted {
            expectation,
            delay: self.delay,
        });
    }
}

/// Convenience error for scripted failures.
pub fn server_error(operation: &'static str) -> ApiError {
    ApiError::Status { operation, status: 500 }
}

#[async_trait]
impl<T: Resource> ResourceApi<T> for MockApi<T> {
    async fn list(&self) -> ApiResult<Vec<T>> {
        match self.next(Call::List).await {
            Expectation::List(response) => response,
            _ => panic!("Unexpected request or expectation mismatch: list"),
        }
    }

    async fn get(&self, id: ResourceId) -> ApiResult<T> {
        match self.next(Call::Get(id)).await {
            Expectation::Get(expected, response) => {
                assert_eq!(expected, id, "get called with unexpected id");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: get {id}"),
        }
    }

    async fn create(&self, _params: &T::Create) -> ApiResult<T> {
        match self.next(Call::Create).await {
            Expectation::Create(response) => response,
            _ => panic!("Unexpected request or expectation mismatch: create"),
        }
    }

    async fn update(&self, id: ResourceId, _params: &T::Update) -> ApiResult<T> {
        match self.next(Call::Update(id)).await {
            Expectation::Update(expected, response) => {
                assert_eq!(expected, id, "update called with unexpected id");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: update {id}"),
        }
    }

    async fn delete(&self, id: ResourceId) -> ApiResult<()> {
        match self.next(Call::Delete(id)).await {
            Expectation::Delete(expected, response) => {
                assert_eq!(expected, id, "delete called with unexpected id");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: delete {id}"),
        }
    }

    async fn reorder(&self, ids: &[ResourceId]) -> ApiResult<()> {
        match self.next(Call::Reorder(ids.to_vec())).await {
            Expectation::Reorder(response) => response,
            _ => panic!("Unexpected request or expectation mismatch: reorder"),
        }
    }

    async fn search(&self, query: &str) -> ApiResult<Vec<SearchResult>> {
        match self.next(Call::Search(query.to_string())).await {
            Expectation::Search(response) => response,
            _ => panic!("Unexpected request or expectation mismatch: search {query}"),
        }
    }
}

// =============================================================================
// COLLABORATOR DOUBLES
// =============================================================================

/// Notifier that keeps every notice for later assertions.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    pub fn contains(&self, notice: &Notice) -> bool {
        lock(&self.notices).contains(notice)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        lock(&self.notices).push(notice);
    }
}

/// Modal that answers from a script and records the dialogs it was shown.
///
/// When the script runs dry every further dialog is dismissed with `Cancel`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    answers: Arc<Mutex<VecDeque<Result<(), Dismissal>>>>,
    dialogs: Arc<Mutex<Vec<ConfirmDialog>>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, answer: Result<(), Dismissal>) -> &Self {
        lock(&self.answers).push_back(answer);
        self
    }

    pub fn dialogs(&self) -> Vec<ConfirmDialog> {
        lock(&self.dialogs).clone()
    }
}

#[async_trait]
impl ModalPrompt for ScriptedPrompt {
    async fn open(&self, dialog: ConfirmDialog) -> Result<(), Dismissal> {
        lock(&self.dialogs).push(dialog);
        lock(&self.answers).pop_front().unwrap_or(Err(Dismissal::Cancel))
    }
}

/// A file handed to a [`RecordingSaver`].
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// File saver that keeps files in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSaver {
    files: Arc<Mutex<Vec<SavedFile>>>,
}

impl RecordingSaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Vec<SavedFile> {
        lock(&self.files).clone()
    }
}

#[async_trait]
impl FileSaver for RecordingSaver {
    async fn save(&self, file_name: &str, mime_type: &str, bytes: Vec<u8>) -> io::Result<()> {
        lock(&self.files).push(SavedFile {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        });
        Ok(())
    }
}

/// Browser that records the URLs it was asked to open.
#[derive(Debug, Default, Clone)]
pub struct RecordingBrowser {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        lock(&self.opened).clone()
    }
}

impl Browser for RecordingBrowser {
    fn open(&self, url: &str) {
        lock(&self.opened).push(url.to_string());
    }
}
