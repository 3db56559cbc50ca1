//! Generic building blocks shared by every admin screen.
//!
//! # Main Components
//!
//! - [`Resource`] - Trait that server-owned records implement
//! - [`ResourceApi`] - The async operation set of one REST resource
//! - [`RestClient`] - `reqwest` implementation of [`ResourceApi`]
//! - [`ConfirmationGate`] - Modal yes/no gate before destructive actions
//! - [`DisposeSignal`] - Teardown signal fanned out to every pending request
//! - [`ApiError`], [`ControllerError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] for a scripted [`ResourceApi`] and recording collaborators.

pub mod api;
pub mod confirm;
pub mod context;
pub mod dispose;
pub mod error;
pub mod feedback;
pub mod http;
pub mod mock;
pub mod platform;
pub mod resource;

pub use api::ResourceApi;
pub use confirm::{
    ButtonStyle, ConfirmDialog, ConfirmOptions, Confirmation, ConfirmationGate, Dismissal,
    FixedPrompt, ModalPrompt,
};
pub use context::ControllerContext;
pub use dispose::{dispose_pair, DisposeHandle, DisposeSignal};
pub use error::{ApiError, ApiResult, ControllerError};
pub use feedback::{DemoMode, DemoSwitch, Notice, NoticeKind, Notifier, TracingNotifier};
pub use http::{ApiClient, RestClient, Scope};
pub use platform::{Browser, DirectorySaver, FileSaver, LoggingBrowser};
pub use resource::{
    display_cmp, Page, Resource, ResourceId, SearchResult, Validate, ValidationError,
};
