//! Article list screen, filtered by publication status.

pub mod resource;

use crate::controllers::{ListController, ListHandle, SearchSettings};
use crate::framework::ResourceApi;
use crate::model::Article;

/// Creates the article list controller and its handle.
pub fn new(
    api: impl ResourceApi<Article>,
    settings: SearchSettings,
    capacity: usize,
) -> (ListController<Article>, ListHandle<Article>) {
    ListController::new(api, settings, capacity)
}
