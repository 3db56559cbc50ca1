//! Audit log screen.
//!
//! ## Structure
//!
//! - [`client`] - [`AuditClient`], paginated list and export over HTTP
//! - [`controller`] - [`AuditController`] actor and its [`AuditHandle`]
//! - [`new()`] - Factory wiring both together

pub mod client;
pub mod controller;

pub use client::*;
pub use controller::*;

use crate::framework::FileSaver;
use std::sync::Arc;

/// Creates the audit controller and its handle.
pub fn new(
    client: AuditClient,
    saver: Arc<dyn FileSaver>,
    page_size: u32,
    capacity: usize,
) -> (AuditController, AuditHandle) {
    AuditController::new(client, saver, page_size, capacity)
}
