//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the console's structured logger.
//!
//! ## Configuration
//!
//! Compact format without the crate/module prefix (`with_target(false)`), filtered by
//! `RUST_LOG`:
//!
//! ```bash
//! # Lifecycle, loads and notices
//! RUST_LOG=info cargo run
//!
//! # Every request, sequence number and dropped stale response
//! RUST_LOG=debug cargo run
//!
//! # Only the HTTP layer
//! RUST_LOG=folio_admin::framework=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Controller lifecycle**: start and dispose of every screen
//! - **Requests**: one `#[instrument]` span per client call carrying the resource path
//! - **State transitions**: loads, searches, reorders and deletes with `seq`, `id` and counts
//! - **Failures**: operation, HTTP status and error text
//!
//! A reorder at `RUST_LOG=debug` reads:
//!
//! ```text
//! DEBUG Reorder resource="projects" ids=[2, 1, 3]
//! DEBUG reorder: Sending request resource="projects"
//! INFO Notice notice=Order saved.
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
