//! Runtime orchestration and lifecycle management.
//!
//! - [`AdminConsole`] - Spawns every screen controller and shuts them down
//! - [`ConsoleConfig`] - Defaults, `FOLIO_*` environment overrides and JSON config files
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod console;
pub mod tracing;

pub use config::*;
pub use console::*;
pub use self::tracing::*;
