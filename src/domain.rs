//! Domain models for the blood bank request workflow.
//!
//! This module contains the core domain types: immutable request records,
//! the mutable draft entry, and application configuration.

/// Request record model.
pub mod record;
pub use record::{FIELD_PLACEHOLDER, Priority, RequestRecord};

/// The in-progress draft entry.
pub mod draft;
pub use draft::{Draft, DraftUpdate};

mod config;
pub use config::{CONFIG_FILE, Config};
