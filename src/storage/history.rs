//! A file backed store of request records.
//!
//! The history is a single JSON array, most recent record first.
//! Persistence is best effort, not authoritative: a missing or malformed
//! file rehydrates as an empty store, and a failed write after an append is
//! logged and otherwise ignored. The application never halts over storage.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::warn;
use uuid::Uuid;

use crate::domain::RequestRecord;

/// File name of the serialized history inside the data root.
pub const HISTORY_FILE: &str = "history.json";

/// An append-only, most-recent-first store of request records.
///
/// Records are immutable once appended; corrections happen by promoting a
/// new record from a restored draft. The store only ever grows by
/// prepension and is never reordered in place.
#[derive(Debug)]
pub struct HistoryStore {
    /// Where the history is persisted.
    path: PathBuf,
    /// Records, newest first.
    records: Vec<RequestRecord>,
}

impl HistoryStore {
    /// Opens the store persisted at `path`.
    ///
    /// Corrupt or unreadable history is not an error; it rehydrates as an
    /// empty store with a warning in the log.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = read_records(&path);
        Self { path, records }
    }

    /// Inserts a record at the front and persists the store.
    ///
    /// Most-recent-first ordering is an invariant the history view depends
    /// on. There is no deduplication: repeat requests for the same patient
    /// are legal and common.
    pub fn append(&mut self, record: RequestRecord) {
        self.records.insert(0, record);
        if let Err(error) = self.persist() {
            warn!(%error, path = %self.path.display(), "failed to persist history");
        }
    }

    /// The full ordered history, newest first.
    #[must_use]
    pub fn all(&self) -> &[RequestRecord] {
        &self.records
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filters the history by a search term.
    ///
    /// Matches a case-insensitive substring of the patient name, or a
    /// substring of the medical record number. An empty query matches
    /// everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&RequestRecord> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record.patient_name.to_lowercase().contains(&needle)
                    || record.medical_record_number.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&RequestRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// The most recent record with the given medical record number.
    #[must_use]
    pub fn find_by_mrn(&self, mrn: &str) -> Option<&RequestRecord> {
        self.records
            .iter()
            .find(|record| record.medical_record_number == mrn)
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.records).map_err(io::Error::other)?;
        fs::write(&self.path, raw)
    }
}

fn read_records(path: &Path) -> Vec<RequestRecord> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(error) => {
            warn!(%error, path = %path.display(), "history unreadable, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(error) => {
            warn!(%error, path = %path.display(), "history malformed, starting empty");
            Vec::new()
        }
    }
}
