//! Composition of the platform print surface.
//!
//! When the print action fires, exactly one thing occupies the surface:
//! the monthly report full-bleed (when that view is open), or N sequential
//! copies of the active subject rendered in the current mode, with a page
//! break between every pair of adjacent copies so multi-copy jobs paginate
//! on physical media instead of collapsing onto one page.

use crate::{domain::RequestRecord, render::PrintMode};

/// Marker separating adjacent copies; maps to a page break on output.
pub const PAGE_BREAK: &str = "\u{c}\n";

/// Everything the print surface can show besides the subject itself.
#[derive(Debug, Clone, Default)]
pub struct SurfaceContext {
    /// Document mode used to render the subject.
    pub mode: PrintMode,
    /// Printable monthly report, present while the report view is open.
    /// Takes over the entire surface.
    pub report: Option<String>,
}

/// Composes the exclusive content of the print surface.
#[must_use]
pub fn compose(subject: &RequestRecord, copies: usize, ctx: &SurfaceContext) -> String {
    if let Some(report) = &ctx.report {
        return report.clone();
    }

    let copy = ctx.mode.render(subject, 1.0);
    let mut out = String::with_capacity((copy.len() + PAGE_BREAK.len()) * copies);
    for index in 0..copies {
        out.push_str(&copy);
        if index + 1 < copies {
            out.push_str(PAGE_BREAK);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::Priority;

    fn subject() -> RequestRecord {
        RequestRecord {
            id: Uuid::new_v4(),
            patient_name: "Budi".to_string(),
            medical_record_number: "7788".to_string(),
            requested_component: "PRC".to_string(),
            ward: "-".to_string(),
            volume_or_units: "-".to_string(),
            referring_physician: "-".to_string(),
            clinical_diagnosis: "-".to_string(),
            blood_group: "-".to_string(),
            rhesus_factor: "-".to_string(),
            priority: Priority::Routine,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn copies_are_separated_by_page_breaks_with_none_trailing() {
        let ctx = SurfaceContext::default();
        let record = subject();
        let single = ctx.mode.render(&record, 1.0);
        for copies in 1..=5 {
            let surface = compose(&record, copies, &ctx);
            assert_eq!(surface.matches(PAGE_BREAK).count(), copies - 1);
            assert!(!surface.ends_with(PAGE_BREAK));
            assert_eq!(surface.matches(&single).count(), copies);
        }
    }

    #[test]
    fn open_report_takes_over_the_surface() {
        let ctx = SurfaceContext {
            mode: PrintMode::Label,
            report: Some("MONTHLY RECAP\n".to_string()),
        };
        let surface = compose(&subject(), 3, &ctx);
        assert_eq!(surface, "MONTHLY RECAP\n");
    }
}
