use chrono::Utc;
use uuid::Uuid;

use super::record::{FIELD_PLACEHOLDER, Priority, RequestRecord};

/// The in-progress request being edited.
///
/// A draft is never persisted; promoting it produces an immutable
/// [`RequestRecord`]. Empty strings mean "not filled in yet". Only the
/// patient name and medical record number gate promotion; every other field
/// is defaulted to [`FIELD_PLACEHOLDER`] at promotion time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Patient's full name (required for promotion).
    pub patient_name: String,
    /// Medical record number (required for promotion).
    pub medical_record_number: String,
    /// Requested blood component.
    pub requested_component: String,
    /// Ward or unit the request originates from.
    pub ward: String,
    /// Requested volume or number of units.
    pub volume_or_units: String,
    /// Referring physician.
    pub referring_physician: String,
    /// Clinical diagnosis.
    pub clinical_diagnosis: String,
    /// ABO blood group.
    pub blood_group: String,
    /// Rhesus factor.
    pub rhesus_factor: String,
    /// Priority tier; resets to routine on [`Draft::clear`].
    pub priority: Priority,
}

/// A partial set of draft fields, merged in by [`Draft::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftUpdate {
    /// New patient name, if changed.
    pub patient_name: Option<String>,
    /// New medical record number, if changed.
    pub medical_record_number: Option<String>,
    /// New requested component, if changed.
    pub requested_component: Option<String>,
    /// New ward, if changed.
    pub ward: Option<String>,
    /// New volume, if changed.
    pub volume_or_units: Option<String>,
    /// New referring physician, if changed.
    pub referring_physician: Option<String>,
    /// New clinical diagnosis, if changed.
    pub clinical_diagnosis: Option<String>,
    /// New blood group, if changed.
    pub blood_group: Option<String>,
    /// New rhesus factor, if changed.
    pub rhesus_factor: Option<String>,
    /// New priority, if changed.
    pub priority: Option<Priority>,
}

impl Draft {
    /// Merges the given fields into the draft.
    ///
    /// No validation happens here; validity is only checked at promotion.
    pub fn update(&mut self, update: DraftUpdate) {
        let DraftUpdate {
            patient_name,
            medical_record_number,
            requested_component,
            ward,
            volume_or_units,
            referring_physician,
            clinical_diagnosis,
            blood_group,
            rhesus_factor,
            priority,
        } = update;

        merge(&mut self.patient_name, patient_name);
        merge(&mut self.medical_record_number, medical_record_number);
        merge(&mut self.requested_component, requested_component);
        merge(&mut self.ward, ward);
        merge(&mut self.volume_or_units, volume_or_units);
        merge(&mut self.referring_physician, referring_physician);
        merge(&mut self.clinical_diagnosis, clinical_diagnosis);
        merge(&mut self.blood_group, blood_group);
        merge(&mut self.rhesus_factor, rhesus_factor);
        if let Some(priority) = priority {
            self.priority = priority;
        }
    }

    /// Resets every field to its empty default, including the priority.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Overwrites the draft with a record's field values.
    ///
    /// The record's `id` and `created_at` are not copied; promoting the
    /// restored draft creates a brand new record.
    pub fn restore(&mut self, record: &RequestRecord) {
        *self = Self {
            patient_name: record.patient_name.clone(),
            medical_record_number: record.medical_record_number.clone(),
            requested_component: record.requested_component.clone(),
            ward: record.ward.clone(),
            volume_or_units: record.volume_or_units.clone(),
            referring_physician: record.referring_physician.clone(),
            clinical_diagnosis: record.clinical_diagnosis.clone(),
            blood_group: record.blood_group.clone(),
            rhesus_factor: record.rhesus_factor.clone(),
            priority: record.priority,
        };
    }

    /// Whether the draft can be promoted to a record.
    ///
    /// True iff the patient name and medical record number are both
    /// non-empty after trimming whitespace.
    #[must_use]
    pub fn is_promotable(&self) -> bool {
        !self.patient_name.trim().is_empty() && !self.medical_record_number.trim().is_empty()
    }

    /// Promotes the draft into a new [`RequestRecord`].
    ///
    /// Returns `None` when the draft is not promotable; the caller treats
    /// this as "action unavailable", never as an error. On success the two
    /// required fields are cleared while every other field is kept, which
    /// speeds up serial entry of similar requests.
    pub fn promote(&mut self) -> Option<RequestRecord> {
        if !self.is_promotable() {
            return None;
        }

        let record = RequestRecord {
            id: Uuid::new_v4(),
            patient_name: self.patient_name.clone(),
            medical_record_number: self.medical_record_number.clone(),
            requested_component: or_placeholder(&self.requested_component),
            ward: or_placeholder(&self.ward),
            volume_or_units: or_placeholder(&self.volume_or_units),
            referring_physician: or_placeholder(&self.referring_physician),
            clinical_diagnosis: or_placeholder(&self.clinical_diagnosis),
            blood_group: or_placeholder(&self.blood_group),
            rhesus_factor: or_placeholder(&self.rhesus_factor),
            priority: self.priority,
            created_at: Utc::now(),
        };

        self.patient_name.clear();
        self.medical_record_number.clear();

        Some(record)
    }

    /// Coerces the live draft into a record-shaped preview value.
    ///
    /// The preview carries the synthetic [`RequestRecord::preview_id`] and a
    /// live timestamp. Blank descriptive fields go through the same
    /// placeholder defaulting as promotion, so renderers never see an empty
    /// string.
    #[must_use]
    pub fn preview(&self) -> RequestRecord {
        RequestRecord {
            id: RequestRecord::preview_id(),
            patient_name: self.patient_name.clone(),
            medical_record_number: self.medical_record_number.clone(),
            requested_component: or_placeholder(&self.requested_component),
            ward: or_placeholder(&self.ward),
            volume_or_units: or_placeholder(&self.volume_or_units),
            referring_physician: or_placeholder(&self.referring_physician),
            clinical_diagnosis: or_placeholder(&self.clinical_diagnosis),
            blood_group: or_placeholder(&self.blood_group),
            rhesus_factor: or_placeholder(&self.rhesus_factor),
            priority: self.priority,
            created_at: Utc::now(),
        }
    }
}

fn merge(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        FIELD_PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Draft {
        Draft {
            patient_name: "Budi Santoso".to_string(),
            medical_record_number: "7788".to_string(),
            requested_component: "PRC".to_string(),
            ward: "ICU".to_string(),
            volume_or_units: "2 units".to_string(),
            referring_physician: "dr. Ratna".to_string(),
            clinical_diagnosis: "Anaemia".to_string(),
            blood_group: "O".to_string(),
            rhesus_factor: "Positif (+)".to_string(),
            priority: Priority::Urgent,
        }
    }

    #[test]
    fn promotable_requires_name_and_mrn() {
        let mut draft = Draft::default();
        assert!(!draft.is_promotable());

        draft.patient_name = "Budi".to_string();
        assert!(!draft.is_promotable());

        draft.medical_record_number = "   ".to_string();
        assert!(!draft.is_promotable());

        draft.medical_record_number = "7788".to_string();
        assert!(draft.is_promotable());

        draft.patient_name = " \t ".to_string();
        assert!(!draft.is_promotable());
    }

    #[test]
    fn promote_fills_blank_fields_with_placeholder() {
        let mut draft = Draft {
            patient_name: "Budi".to_string(),
            medical_record_number: "7788".to_string(),
            ..Draft::default()
        };

        let record = draft.promote().unwrap();
        assert_eq!(record.requested_component, FIELD_PLACEHOLDER);
        assert_eq!(record.ward, FIELD_PLACEHOLDER);
        assert_eq!(record.volume_or_units, FIELD_PLACEHOLDER);
        assert_eq!(record.referring_physician, FIELD_PLACEHOLDER);
        assert_eq!(record.clinical_diagnosis, FIELD_PLACEHOLDER);
        assert_eq!(record.blood_group, FIELD_PLACEHOLDER);
        assert_eq!(record.rhesus_factor, FIELD_PLACEHOLDER);
        assert_eq!(record.priority, Priority::Routine);
        assert!(!record.id.is_nil());
    }

    #[test]
    fn promote_clears_required_fields_only() {
        let mut draft = filled();
        let record = draft.promote().unwrap();

        assert!(draft.patient_name.is_empty());
        assert!(draft.medical_record_number.is_empty());
        assert_eq!(draft.requested_component, "PRC");
        assert_eq!(draft.ward, "ICU");
        assert_eq!(draft.priority, Priority::Urgent);
        assert_eq!(record.patient_name, "Budi Santoso");
    }

    #[test]
    fn promote_unpromotable_returns_none_and_leaves_draft_alone() {
        let mut draft = Draft {
            ward: "ICU".to_string(),
            ..Draft::default()
        };
        let before = draft.clone();
        assert_eq!(draft.promote(), None);
        assert_eq!(draft, before);
    }

    #[test]
    fn restore_copies_everything_but_id_and_timestamp() {
        let mut source = filled();
        let record = source.promote().unwrap();

        let mut draft = Draft::default();
        draft.restore(&record);

        assert_eq!(draft.patient_name, record.patient_name);
        assert_eq!(draft.medical_record_number, record.medical_record_number);
        assert_eq!(draft.requested_component, record.requested_component);
        assert_eq!(draft.ward, record.ward);
        assert_eq!(draft.volume_or_units, record.volume_or_units);
        assert_eq!(draft.referring_physician, record.referring_physician);
        assert_eq!(draft.clinical_diagnosis, record.clinical_diagnosis);
        assert_eq!(draft.blood_group, record.blood_group);
        assert_eq!(draft.rhesus_factor, record.rhesus_factor);
        assert_eq!(draft.priority, record.priority);

        // A promotion of the restored draft mints a new identity.
        let reissued = draft.promote().unwrap();
        assert_ne!(reissued.id, record.id);
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut draft = filled();
        draft.update(DraftUpdate {
            ward: Some("ER".to_string()),
            priority: Some(Priority::Routine),
            ..DraftUpdate::default()
        });

        assert_eq!(draft.ward, "ER");
        assert_eq!(draft.priority, Priority::Routine);
        assert_eq!(draft.patient_name, "Budi Santoso");
    }

    #[test]
    fn clear_resets_priority() {
        let mut draft = filled();
        draft.clear();
        assert_eq!(draft, Draft::default());
    }

    #[test]
    fn preview_uses_synthetic_id_and_placeholders() {
        let draft = Draft {
            patient_name: "Budi".to_string(),
            ..Draft::default()
        };
        let preview = draft.preview();
        assert!(preview.is_preview());
        assert_eq!(preview.patient_name, "Budi");
        assert_eq!(preview.blood_group, FIELD_PLACEHOLDER);
    }
}
