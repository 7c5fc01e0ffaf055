use chrono::Local;

use super::{fit, scaled_width, spread};
use crate::domain::{Priority, RequestRecord};

/// Interior columns of the sticker at scale 1.0.
const BASE_WIDTH: usize = 46;

/// Lines in the rendered label, borders included.
pub const LABEL_LINES: usize = 10;

/// Renders the small adhesive label for a request.
///
/// The output always has exactly [`LABEL_LINES`] lines; the scale factor
/// changes only the width. Long values are truncated, never wrapped.
#[must_use]
pub fn render_label(record: &RequestRecord, scale: f32) -> String {
    let width = scaled_width(BASE_WIDTH, scale);
    let date = record
        .created_at
        .with_timezone(&Local)
        .format("%d/%m/%Y")
        .to_string();

    let mut lines = Vec::with_capacity(LABEL_LINES);
    lines.push(format!("+{}+", "-".repeat(width)));
    lines.push(boxed(&spread(" BLOOD BANK UNIT", &format!("{date} "), width), width));
    lines.push(format!("|{}|", "-".repeat(width)));
    lines.push(field("MRN", &record.medical_record_number, width));
    lines.push(field("Patient", &record.patient_name, width));
    lines.push(field("Component", &record.requested_component, width));
    lines.push(field("Ward", &record.ward, width));
    lines.push(field("Volume", &record.volume_or_units, width));
    let priority = match record.priority {
        Priority::Urgent => "Priority : *** CITO ***".to_string(),
        Priority::Routine => "Priority : Routine".to_string(),
    };
    lines.push(boxed(&format!(" {priority}"), width));
    lines.push(format!("+{}+", "-".repeat(width)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn boxed(content: &str, width: usize) -> String {
    format!("|{}|", fit(content, width))
}

fn field(name: &str, value: &str, width: usize) -> String {
    boxed(&format!(" {name:<9}: {value}"), width)
}
