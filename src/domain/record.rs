use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder stored in descriptive fields left blank at promotion time.
///
/// A promoted record never holds an empty string in these fields.
pub const FIELD_PLACEHOLDER: &str = "-";

/// Priority tier of a blood-product request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Routine / elective request ("Biasa").
    #[default]
    Routine,
    /// Rush request, known on the ward as "Cito".
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Routine => f.write_str("Routine"),
            Self::Urgent => f.write_str("CITO"),
        }
    }
}

/// A single blood-product request, immutable once created.
///
/// Corrections are made by restoring the values into a fresh draft and
/// promoting a new record; stored records are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    /// Unique identifier, assigned at creation and never reused.
    pub id: Uuid,
    /// Patient's full name.
    pub patient_name: String,
    /// Medical record number; the hospital's patient lookup key and the
    /// value printed on the label.
    pub medical_record_number: String,
    /// Requested blood component (WB, PRC, TC, FFP, ...).
    pub requested_component: String,
    /// Ward or unit the request originates from.
    pub ward: String,
    /// Requested volume or number of units.
    pub volume_or_units: String,
    /// Referring physician.
    pub referring_physician: String,
    /// Clinical diagnosis motivating the request.
    pub clinical_diagnosis: String,
    /// ABO blood group.
    pub blood_group: String,
    /// Rhesus factor.
    pub rhesus_factor: String,
    /// Priority tier.
    #[serde(default)]
    pub priority: Priority,
    /// Creation time, stored as milliseconds since the epoch.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl RequestRecord {
    /// The synthetic identifier carried by the live draft preview.
    #[must_use]
    pub const fn preview_id() -> Uuid {
        Uuid::nil()
    }

    /// Whether this value is the live preview rather than a stored record.
    #[must_use]
    pub fn is_preview(&self) -> bool {
        self.id.is_nil()
    }
}
