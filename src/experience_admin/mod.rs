//! Experience timeline screen. Orderable like projects.

pub mod resource;

use crate::controllers::{ListController, ListHandle, SearchSettings};
use crate::framework::ResourceApi;
use crate::model::Experience;

/// Creates the experience list controller and its handle.
pub fn new(
    api: impl ResourceApi<Experience>,
    settings: SearchSettings,
    capacity: usize,
) -> (ListController<Experience>, ListHandle<Experience>) {
    ListController::new(api, settings, capacity)
}
