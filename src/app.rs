//! The top-level application controller.
//!
//! All mutable state lives here, behind one owner: the record store, the
//! draft entry, the print orchestrator and the view flags. Every mutation
//! goes through a named transition; nothing else writes to this state.

use std::{path::Path, time::Duration};

use uuid::Uuid;

use crate::{
    domain::{Config, Draft, DraftUpdate, RequestRecord},
    print::{
        Orchestrator, PrintDispatcher, PrintIntent, PrintState,
        surface::SurfaceContext,
    },
    render::PrintMode,
    storage::{HISTORY_FILE, HistoryStore},
    views::MonthlyReport,
};

/// The application state and its single writer.
#[derive(Debug)]
pub struct App {
    config: Config,
    store: HistoryStore,
    draft: Draft,
    orchestrator: Orchestrator,
    print_mode: PrintMode,
    report_open: Option<MonthlyReport>,
}

impl App {
    /// Opens the application state rooted at `root`.
    ///
    /// The history file lives in `root`; a missing or corrupt history opens
    /// as empty rather than failing.
    #[must_use]
    pub fn open(root: &Path, config: Config) -> Self {
        let store = HistoryStore::open(root.join(HISTORY_FILE));
        let orchestrator = Orchestrator::new(Duration::from_millis(config.dispatch_delay_ms));
        Self {
            print_mode: config.default_mode,
            config,
            store,
            draft: Draft::default(),
            orchestrator,
            report_open: None,
        }
    }

    /// The record store.
    #[must_use]
    pub const fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// The draft entry being edited.
    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The current document mode.
    #[must_use]
    pub const fn print_mode(&self) -> PrintMode {
        self.print_mode
    }

    /// The print cycle phase.
    #[must_use]
    pub const fn print_state(&self) -> PrintState {
        self.orchestrator.state()
    }

    /// Switches between label and form documents.
    pub const fn set_print_mode(&mut self, mode: PrintMode) {
        self.print_mode = mode;
    }

    /// Overrides the auto-print toggle for this session.
    pub const fn set_auto_print(&mut self, enabled: bool) {
        self.config.auto_print = enabled;
    }

    /// Merges fields into the draft.
    pub fn update_draft(&mut self, update: DraftUpdate) {
        self.draft.update(update);
    }

    /// Resets the draft to its empty defaults.
    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// Seeds the draft from a historical record.
    ///
    /// Returns false when no record has that id.
    pub fn restore(&mut self, id: Uuid) -> bool {
        let Some(record) = self.store.get(id).cloned() else {
            return false;
        };
        self.draft.restore(&record);
        true
    }

    /// Promotes the draft into the store.
    ///
    /// Returns the new record's id, or `None` when the draft is missing its
    /// required fields (the action is unavailable, not an error). With
    /// auto-print enabled, one copy of the new record is printed
    /// immediately, bypassing the settings prompt.
    pub fn add(&mut self, dispatcher: &mut dyn PrintDispatcher) -> Option<Uuid> {
        let record = self.draft.promote()?;
        let id = record.id;
        self.store.append(record.clone());

        if self.config.auto_print {
            let ctx = self.surface_context();
            self.orchestrator.auto_print(&record, &ctx, dispatcher);
        }

        Some(id)
    }

    /// Begins a print cycle.
    ///
    /// `subject` names a historical record, or `None` for the live draft
    /// preview. Returns false when the id is unknown.
    pub fn initiate_print(&mut self, subject: Option<Uuid>, intent: PrintIntent) -> bool {
        let subject = match subject {
            Some(id) => match self.store.get(id).cloned() {
                Some(record) => Some(record),
                None => return false,
            },
            None => None,
        };
        self.orchestrator.initiate(subject, intent);
        true
    }

    /// Confirms the pending print cycle with a raw copy count.
    ///
    /// Returns the clamped copy count actually printed, or `None` when no
    /// cycle was pending.
    pub fn execute_print(
        &mut self,
        copies_raw: f64,
        dispatcher: &mut dyn PrintDispatcher,
    ) -> Option<usize> {
        let preview = self.draft.preview();
        let ctx = self.surface_context();
        self.orchestrator
            .execute_print(copies_raw, &preview, &ctx, dispatcher)
    }

    /// Abandons the pending print cycle.
    pub fn cancel_print(&mut self) {
        self.orchestrator.cancel();
    }

    /// Opens the monthly report view.
    ///
    /// While open, the report's printable page takes over the entire print
    /// surface.
    pub fn open_report(&mut self, year: i32, month: u32) {
        self.report_open = Some(MonthlyReport::build(self.store.all(), year, month));
    }

    /// Closes the monthly report view.
    pub fn close_report(&mut self) {
        self.report_open = None;
    }

    /// The open report, if any.
    #[must_use]
    pub const fn report(&self) -> Option<&MonthlyReport> {
        self.report_open.as_ref()
    }

    /// Renders the on-screen preview of the active print subject.
    #[must_use]
    pub fn preview(&self, scale: f32) -> String {
        let draft_preview = self.draft.preview();
        let subject = self.orchestrator.subject(&draft_preview);
        self.print_mode.render(subject, scale)
    }

    fn surface_context(&self) -> SurfaceContext {
        SurfaceContext {
            mode: self.print_mode,
            report: self.report_open.as_ref().map(MonthlyReport::render),
        }
    }
}
