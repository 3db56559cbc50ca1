//! Client-side state controllers shared by the admin screens.
//!
//! - [`list`] - collection, loading/error flags, search overlay, reorder and delete
//! - [`search`] - debounce and query classification
//! - [`reorder`] - swap and renumber arithmetic
//! - [`pager`] - page cursor and page-number window
//! - [`editor`] - validated create/update submission

pub mod editor;
pub mod list;
pub mod pager;
pub mod reorder;
pub mod search;

pub use editor::{Editor, FormInput, SubmitError};
pub use list::{ListController, ListHandle, ListView};
pub use pager::{page_numbers, PageCursor, PAGE_WINDOW};
pub use reorder::Direction;
pub use search::{QueryInput, QueryIntent, SearchSettings, SearchState};
