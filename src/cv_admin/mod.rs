//! CV screen: the public current CV and admin management of uploads.

pub mod client;
pub mod controller;
pub mod error;

pub use client::*;
pub use controller::*;
pub use error::*;

use crate::framework::Browser;
use std::sync::Arc;

pub fn new(client: CvClient, browser: Arc<dyn Browser>, capacity: usize) -> (CvController, CvHandle) {
    CvController::new(client, browser, capacity)
}
