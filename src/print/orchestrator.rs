use std::{thread, time::Duration};

use tracing::debug;

use super::surface::{self, SurfaceContext};
use crate::domain::RequestRecord;

/// Advisory print intent.
///
/// Selects the guidance text shown in the settings prompt; it never changes
/// what actually happens when the dispatcher fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrintIntent {
    /// Send to a physical printer.
    #[default]
    Print,
    /// The user intends to save the output as a PDF.
    SavePdf,
}

/// The platform print action.
///
/// Dispatch is fire-and-forget: the orchestrator cannot observe completion
/// or cancellation, so there is nothing to return.
pub trait PrintDispatcher {
    /// Takes a snapshot of the composed print surface.
    fn dispatch(&mut self, surface: &str);
}

/// Dispatcher that spools the surface to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSpool;

impl PrintDispatcher for StdoutSpool {
    fn dispatch(&mut self, surface: &str) {
        print!("{surface}");
    }
}

/// Externally observable phase of the print cycle.
///
/// `Printing` never appears here: once configuration is confirmed the
/// sequence runs to completion inside the confirming call and the
/// orchestrator is back at idle when it returns. Cancellation is only
/// possible while configuring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrintState {
    /// No print cycle in progress.
    #[default]
    Idle,
    /// The settings prompt is up; a subject and intent are pending.
    Configuring,
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    Configuring(Pending),
}

#[derive(Debug, Clone)]
struct Pending {
    /// Explicit subject, or `None` for the live draft preview.
    subject: Option<RequestRecord>,
    intent: PrintIntent,
}

/// The print state machine.
///
/// Decides which record-shaped value is the active print subject, gates
/// confirmation behind the settings prompt, and invokes the platform print
/// action at the right moment. Inputs are clamped rather than rejected;
/// the only failure the user can see is the platform's own, which is
/// invisible here.
#[derive(Debug)]
pub struct Orchestrator {
    state: State,
    settle_delay: Duration,
}

impl Orchestrator {
    /// Creates an orchestrator.
    ///
    /// `settle_delay` is the fixed wait between committing a print
    /// configuration and invoking the dispatcher, giving the surface time
    /// to re-render with the final copy count. Tests pass zero.
    #[must_use]
    pub const fn new(settle_delay: Duration) -> Self {
        Self {
            state: State::Idle,
            settle_delay,
        }
    }

    /// The current phase.
    #[must_use]
    pub const fn state(&self) -> PrintState {
        match self.state {
            State::Idle => PrintState::Idle,
            State::Configuring(_) => PrintState::Configuring,
        }
    }

    /// The pending intent, while configuring.
    #[must_use]
    pub const fn pending_intent(&self) -> Option<PrintIntent> {
        match &self.state {
            State::Idle => None,
            State::Configuring(pending) => Some(pending.intent),
        }
    }

    /// Resolves the active print subject.
    ///
    /// The explicit pending subject when one is set, otherwise the live
    /// draft preview. Both the on-screen preview and the print surface use
    /// this same rule.
    #[must_use]
    pub fn subject<'a>(&'a self, draft_preview: &'a RequestRecord) -> &'a RequestRecord {
        match &self.state {
            State::Configuring(Pending {
                subject: Some(subject),
                ..
            }) => subject,
            _ => draft_preview,
        }
    }

    /// Begins a print cycle, surfacing the settings prompt.
    ///
    /// `subject` of `None` means "print the live draft preview". Re-entrant:
    /// initiating while already configuring replaces the pending subject and
    /// intent, last call wins. Print requests are never queued.
    pub fn initiate(&mut self, subject: Option<RequestRecord>, intent: PrintIntent) {
        self.state = State::Configuring(Pending { subject, intent });
    }

    /// Abandons the pending cycle.
    ///
    /// Discards the pending subject and intent. A no-op when idle.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    /// Confirms the pending configuration and runs the print to completion.
    ///
    /// Only valid while configuring; returns `None` otherwise. The raw copy
    /// count is clamped to a positive integer, never rejected. After the
    /// settle delay the dispatcher receives the composed surface exactly
    /// once, and the orchestrator is idle again. Returns the copy count
    /// actually used.
    pub fn execute_print(
        &mut self,
        copies_raw: f64,
        draft_preview: &RequestRecord,
        ctx: &SurfaceContext,
        dispatcher: &mut dyn PrintDispatcher,
    ) -> Option<usize> {
        let State::Configuring(pending) = std::mem::take(&mut self.state) else {
            debug!("execute_print outside of configuration, ignoring");
            return None;
        };

        let copies = super::normalize_copies(copies_raw);
        let subject = pending.subject.as_ref().unwrap_or(draft_preview);
        self.run_to_completion(subject, copies, ctx, dispatcher);
        Some(copies)
    }

    /// The auto-print fast path.
    ///
    /// Skips configuration entirely: the newly promoted record becomes the
    /// subject and exactly one copy is printed, regardless of any copy
    /// count configured earlier. Any pending configuration is discarded.
    pub fn auto_print(
        &mut self,
        record: &RequestRecord,
        ctx: &SurfaceContext,
        dispatcher: &mut dyn PrintDispatcher,
    ) {
        self.state = State::Idle;
        self.run_to_completion(record, 1, ctx, dispatcher);
    }

    fn run_to_completion(
        &self,
        subject: &RequestRecord,
        copies: usize,
        ctx: &SurfaceContext,
        dispatcher: &mut dyn PrintDispatcher,
    ) {
        // Settle: the surface must re-render with the final copy count
        // before the snapshot is taken.
        thread::sleep(self.settle_delay);
        let document = surface::compose(subject, copies, ctx);
        debug!(copies, bytes = document.len(), "dispatching print surface");
        dispatcher.dispatch(&document);
    }
}
