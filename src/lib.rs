//! # Folio Admin
//!
//! > **The client-side core of a portfolio admin console.**
//!
//! This crate drives the admin screens of a personal portfolio site (projects, experiences,
//! articles, the audit trail and the CV) against its REST API. Every screen is a small actor
//! that owns its state, talks HTTP through a typed client and publishes snapshots for the UI.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Resources + Actors
//!
//! - **Resources**: Projects, experiences and articles all behave the same way: list, get,
//!   create, update, delete, reorder, search. One [`Resource`](framework::Resource) trait
//!   describes them.
//! - **Actors**: One Tokio task per screen processes commands and request completions one at
//!   a time, so no locks guard screen state.
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: The Power of `T`
//! `ListController<T: Resource>` is written once and drives all three list screens. Each
//! resource only supplies its path, labels, ordering hooks and form validation.
//!
//! ### Mocking: Testing without a Server
//! Controllers depend on the [`ResourceApi`](framework::ResourceApi) trait, not on HTTP.
//! [`MockApi`](framework::mock::MockApi) scripts responses and delays; see
//! [`framework::mock`].
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Stale Responses Are Dropped
//! Loads and searches carry a sequence number. Only the latest one may touch the screen.
//!
//! ### 2. Late-Bound Context
//! Notifier, demo mode and the confirmation gate are handed to `run()`, not to `new()`.
//!
//! ### 3. Dispose Cancels Everything
//! Disposing a screen (or dropping its last handle) stops the actor and every request it
//! started.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Plumbing ([`framework`])
//! - **Role**: HTTP client, resource trait, errors, notices, confirmation gate, dispose signal.
//! - **Key items**: [`RestClient`](framework::RestClient), [`Resource`](framework::Resource),
//!   [`ConfirmationGate`](framework::ConfirmationGate).
//!
//! ### 2. The Screen Logic ([`controllers`])
//! - **Role**: The list-state actor with its search overlay and reorder coordinator, the form
//!   editor and the pagination helpers.
//! - **Key items**: [`ListController`](controllers::ListController),
//!   [`ListHandle`](controllers::ListHandle), [`Editor`](controllers::Editor).
//!
//! ### 3. The Screens ([`project_admin`], [`experience_admin`], [`article_admin`],
//! [`audit_admin`], [`cv_admin`])
//! - **Role**: Resource bindings and the audit and CV controllers.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: Configuration, tracing setup and [`AdminConsole`](lifecycle::AdminConsole).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! FOLIO_API_BASE_URL=http://localhost:8080/api RUST_LOG=info cargo run
//! ```
//!
//! ```bash
//! cargo test
//! ```

pub mod article_admin;
pub mod audit_admin;
pub mod controllers;
pub mod cv_admin;
pub mod experience_admin;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod project_admin;
