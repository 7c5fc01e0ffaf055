//! Blood-bank request labeling and printing
//!
//! Staff enter a patient's blood-product request, preview it as an adhesive
//! label or an A4 request form, print one or more copies, and browse,
//! search and report on the request history. Everything is local to the
//! device; history is a JSON file, and the platform print action sits
//! behind an injectable dispatcher.

pub mod domain;
pub use domain::{Config, Draft, DraftUpdate, Priority, RequestRecord};

/// Local persistence for the request history.
pub mod storage;
pub use storage::HistoryStore;

pub mod render;
pub use render::PrintMode;

pub mod print;
pub use print::{Orchestrator, PrintDispatcher, PrintIntent, PrintSettings, PrintState};

pub mod views;
pub use views::{CalendarMonth, MonthlyReport};

pub mod app;
pub use app::App;
