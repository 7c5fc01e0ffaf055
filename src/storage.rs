//! Local persistence for the request history.

pub mod history;

pub use history::{HISTORY_FILE, HistoryStore};
