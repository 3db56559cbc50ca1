//! Project list screen.
//!
//! ## Structure
//!
//! - [`resource`] - [`Resource`](crate::framework::Resource) implementation and form validation
//! - [`new()`] - Factory for the list controller and its handle
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (controller, projects) = project_admin::new(client, SearchSettings::default(), 32);
//! tokio::spawn(controller.run(ctx));
//!
//! projects.load().await?;
//! projects.move_down(0).await?;
//! ```

pub mod resource;

use crate::controllers::{ListController, ListHandle, SearchSettings};
use crate::framework::ResourceApi;
use crate::model::Project;

/// Creates the project list controller and its handle.
pub fn new(
    api: impl ResourceApi<Project>,
    settings: SearchSettings,
    capacity: usize,
) -> (ListController<Project>, ListHandle<Project>) {
    ListController::new(api, settings, capacity)
}
