//! Wire types of the portfolio backend.
//!
//! Plain data with `serde` derives. The [`Resource`](crate::framework::Resource)
//! implementations live next to each admin screen.

pub mod article;
pub mod audit;
pub mod cv;
pub mod experience;
pub mod project;

pub use article::*;
pub use audit::*;
pub use cv::*;
pub use experience::*;
pub use project::*;
