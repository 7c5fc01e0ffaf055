//! Read-only projections over the request history.
//!
//! None of these hold authoritative state; they are recomputed from the
//! store on demand.

pub mod calendar;
pub mod report;

pub use calendar::{CalendarMonth, group_by_day};
pub use report::MonthlyReport;
