use chrono::Local;

use super::{fit, scaled_width, spread};
use crate::domain::{Priority, RequestRecord};

/// Interior columns of the A4 page at scale 1.0.
const BASE_WIDTH: usize = 72;

/// Lines in the rendered form, borders included. A4 proportioned at a
/// typical monospace aspect ratio.
pub const FORM_LINES: usize = 48;

/// Renders the full request form for a request.
///
/// The output always has exactly [`FORM_LINES`] lines; the scale factor
/// changes only the width. Long values are truncated, never wrapped.
#[must_use]
pub fn render_form(record: &RequestRecord, scale: f32) -> String {
    let width = scaled_width(BASE_WIDTH, scale);
    let stamp = record
        .created_at
        .with_timezone(&Local)
        .format("%d/%m/%Y %H:%M")
        .to_string();
    let reference = if record.is_preview() {
        "PREVIEW".to_string()
    } else {
        let simple = record.id.simple().to_string();
        simple[..8].to_uppercase()
    };

    let (routine_box, urgent_box) = match record.priority {
        Priority::Routine => ("[x]", "[ ]"),
        Priority::Urgent => ("[ ]", "[x]"),
    };

    let mut lines: Vec<String> = Vec::with_capacity(FORM_LINES);
    let rule = format!("+{}+", "-".repeat(width));
    let inner_rule = format!("|{}|", "-".repeat(width));
    let boxed = |content: &str| format!("|{}|", fit(content, width));
    let centred = |content: &str| {
        let len = content.chars().count().min(width);
        let pad = (width - len) / 2;
        format!("|{}|", fit(&format!("{}{content}", " ".repeat(pad)), width))
    };
    let field = |name: &str, value: &str| boxed(&format!("   {name:<21}: {value}"));

    lines.push(rule.clone());
    lines.push(centred("BLOOD BANK UNIT"));
    lines.push(centred("BLOOD PRODUCT REQUEST FORM"));
    lines.push(inner_rule);
    lines.push(boxed(&spread(
        &format!(" Date: {stamp}"),
        &format!("No: {reference} "),
        width,
    )));
    lines.push(boxed(""));

    lines.push(boxed(" PATIENT IDENTITY"));
    lines.push(field("Patient name", &record.patient_name));
    lines.push(field("Medical record no", &record.medical_record_number));
    lines.push(field("Ward", &record.ward));
    lines.push(boxed(""));

    lines.push(boxed(" CLINICAL DATA"));
    lines.push(field("Referring physician", &record.referring_physician));
    lines.push(field("Clinical diagnosis", &record.clinical_diagnosis));
    lines.push(field("Blood group", &record.blood_group));
    lines.push(field("Rhesus factor", &record.rhesus_factor));
    lines.push(boxed(""));

    lines.push(boxed(" REQUEST DETAILS"));
    lines.push(field("Component", &record.requested_component));
    lines.push(field("Volume / units", &record.volume_or_units));
    lines.push(field(
        "Priority",
        &format!("{routine_box} Routine   {urgent_box} CITO / Urgent"),
    ));
    lines.push(boxed(""));

    lines.push(boxed(" FOR BLOOD BANK STAFF"));
    lines.push(field("Received by", "......................."));
    lines.push(field("Issued units", "......................."));
    lines.push(field("Crossmatch result", "......................."));

    // Signature block pinned to the bottom of the page.
    let mut tail: Vec<String> = Vec::new();
    tail.push(boxed(&spread("", "Requesting physician,      ", width)));
    tail.push(boxed(""));
    tail.push(boxed(""));
    tail.push(boxed(&spread("", "(.....................)      ", width)));
    tail.push(boxed(""));
    tail.push(boxed(" Copy 1: Blood Bank | Copy 2: Medical Records"));
    tail.push(rule);

    while lines.len() + tail.len() < FORM_LINES {
        lines.push(boxed(""));
    }
    lines.truncate(FORM_LINES - tail.len());
    lines.extend(tail);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn sample() -> RequestRecord {
        RequestRecord {
            id: Uuid::new_v4(),
            patient_name: "Budi Santoso".to_string(),
            medical_record_number: "7788".to_string(),
            requested_component: "Fresh Frozen Plasma (FFP)".to_string(),
            ward: "ICU".to_string(),
            volume_or_units: "2 units".to_string(),
            referring_physician: "dr. Ratna".to_string(),
            clinical_diagnosis: "Anaemia".to_string(),
            blood_group: "O".to_string(),
            rhesus_factor: "Positif (+)".to_string(),
            priority: Priority::Routine,
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn form_has_fixed_dimensions() {
        let form = render_form(&sample(), 1.0);
        let lines: Vec<_> = form.lines().collect();
        assert_eq!(lines.len(), FORM_LINES);
        for line in &lines {
            assert_eq!(line.chars().count(), BASE_WIDTH + 2, "line {line:?}");
        }
    }

    #[test]
    fn form_carries_clinical_fields() {
        let form = render_form(&sample(), 1.0);
        assert!(form.contains("Budi Santoso"));
        assert!(form.contains("Fresh Frozen Plasma (FFP)"));
        assert!(form.contains("dr. Ratna"));
        assert!(form.contains("[x] Routine"));
    }

    #[test]
    fn urgent_requests_tick_the_cito_box() {
        let mut record = sample();
        record.priority = Priority::Urgent;
        let form = render_form(&record, 1.0);
        assert!(form.contains("[x] CITO / Urgent"));
        assert!(form.contains("[ ] Routine"));
    }

    #[test]
    fn preview_shows_synthetic_reference() {
        let mut record = sample();
        record.id = RequestRecord::preview_id();
        let form = render_form(&record, 1.0);
        assert!(form.contains("No: PREVIEW"));
    }

    #[test]
    fn dimensions_hold_under_scaling_and_long_input() {
        let mut record = sample();
        record.clinical_diagnosis = "very long diagnosis ".repeat(20);
        let form = render_form(&record, 0.5);
        assert_eq!(form.lines().count(), FORM_LINES);
        let width = scaled_width(BASE_WIDTH, 0.5) + 2;
        assert!(form.lines().all(|l| l.chars().count() == width));
    }
}
