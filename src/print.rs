//! Print orchestration: everything between "the user wants this printed"
//! and the platform print action.
//!
//! The orchestrator is a small state machine (`Idle -> Configuring ->
//! Printing -> Idle`, with an auto-print fast path that skips
//! configuration). The platform print action itself sits behind the
//! [`PrintDispatcher`] trait so tests can record what would have been
//! spooled.

mod orchestrator;
mod settings;
pub mod surface;

pub use orchestrator::{Orchestrator, PrintDispatcher, PrintIntent, PrintState, StdoutSpool};
pub use settings::{PrintSettings, SOFT_COPY_CAP, normalize_copies, parse_copies};

#[cfg(test)]
pub(crate) mod test_support {
    use super::PrintDispatcher;

    /// Records every surface handed to the platform print action.
    #[derive(Debug, Default)]
    pub struct Recorder {
        /// Dispatched surfaces, in order.
        pub surfaces: Vec<String>,
    }

    impl PrintDispatcher for Recorder {
        fn dispatch(&mut self, surface: &str) {
            self.surfaces.push(surface.to_string());
        }
    }
}
