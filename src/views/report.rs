//! Monthly recapitulation report over the request history.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{Datelike, Local};

use crate::domain::{Priority, RequestRecord};
use crate::views::calendar::{CalendarMonth, MONTH_NAMES};

/// Days used as the denominator of the per-day average.
///
/// Fixed at 30 regardless of the actual length of the selected month; the
/// reported figure is an approximation the ward staff are used to.
const AVERAGE_DENOMINATOR_DAYS: f64 = 30.0;

/// Aggregated statistics for one (month, year) period.
///
/// A pure projection over the store; built on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    year: i32,
    month: u32,
    /// Matching records, oldest first.
    pub rows: Vec<RequestRecord>,
    /// Total number of requests in the period.
    pub total: usize,
    /// Requests flagged CITO.
    pub urgent: usize,
    /// Routine requests.
    pub routine: usize,
    /// Request counts per ABO blood group.
    pub by_blood_group: BTreeMap<String, usize>,
    /// Request counts per requested component.
    pub by_component: BTreeMap<String, usize>,
}

impl MonthlyReport {
    /// Builds the report for the given month and year, in local time.
    ///
    /// Only records whose local-time month and year match exactly are
    /// included. Out-of-range months are clamped into 1..=12. The sums of
    /// both distributions always equal `total`.
    #[must_use]
    pub fn build(records: &[RequestRecord], year: i32, month: u32) -> Self {
        let month = CalendarMonth::new(year, month).month();
        let mut rows: Vec<RequestRecord> = records
            .iter()
            .filter(|record| {
                let local = record.created_at.with_timezone(&Local);
                local.year() == year && local.month() == month
            })
            .cloned()
            .collect();
        rows.sort_by_key(|record| record.created_at);

        let mut urgent = 0;
        let mut routine = 0;
        let mut by_blood_group: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_component: BTreeMap<String, usize> = BTreeMap::new();

        for record in &rows {
            match record.priority {
                Priority::Urgent => urgent += 1,
                Priority::Routine => routine += 1,
            }
            *by_blood_group
                .entry(record.blood_group.clone())
                .or_default() += 1;
            *by_component
                .entry(record.requested_component.clone())
                .or_default() += 1;
        }

        Self {
            year,
            month,
            total: rows.len(),
            rows,
            urgent,
            routine,
            by_blood_group,
            by_component,
        }
    }

    /// The report year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The report month, 1 through 12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Human-readable period, e.g. "March 2024".
    #[must_use]
    pub fn period(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month as usize - 1)
            .copied()
            .unwrap_or("?");
        format!("{name} {}", self.year)
    }

    /// Average requests per day across a fixed 30-day period.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_per_day(&self) -> f64 {
        self.total as f64 / AVERAGE_DENOMINATOR_DAYS
    }

    /// Renders the printable full-page report.
    ///
    /// This is the content that takes over the print surface while the
    /// report view is open.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:^72}", "BLOOD BANK RECAPITULATION REPORT");
        let _ = writeln!(out, "{:^72}", format!("Period: {}", self.period()));
        let _ = writeln!(out, "{}", "=".repeat(72));
        let _ = writeln!(out);
        let _ = writeln!(out, "  Total requests    : {}", self.total);
        let _ = writeln!(out, "  CITO / urgent     : {}", self.urgent);
        let _ = writeln!(out, "  Routine / elective: {}", self.routine);
        let _ = writeln!(out, "  Average per day   : {:.1}", self.average_per_day());
        let _ = writeln!(out);

        let _ = writeln!(out, "  BLOOD GROUP DISTRIBUTION");
        let _ = writeln!(out, "  {}", "-".repeat(40));
        for (group, count) in &self.by_blood_group {
            let _ = writeln!(out, "  {:<10} {} {count}", group, bar(*count, self.total));
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "  COMPONENT DISTRIBUTION");
        let _ = writeln!(out, "  {}", "-".repeat(40));
        for (component, count) in &self.by_component {
            let label: String = component.chars().take(28).collect();
            let _ = writeln!(out, "  {label:<28} {} {count}", bar(*count, self.total));
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "  DETAIL");
        let _ = writeln!(
            out,
            "  {:<6}{:<10}{:<22}{:<6}{:<16}{:<8}{}",
            "DATE", "MRN", "PATIENT", "GRP", "COMPONENT", "VOL", "NOTE"
        );
        let _ = writeln!(out, "  {}", "-".repeat(70));
        if self.rows.is_empty() {
            let _ = writeln!(out, "  (no data for this period)");
        }
        for record in &self.rows {
            let date = record.created_at.with_timezone(&Local).format("%d/%m");
            let note = match record.priority {
                Priority::Urgent => "CITO",
                Priority::Routine => "",
            };
            let _ = writeln!(
                out,
                "  {:<6}{:<10}{:<22}{:<6}{:<16}{:<8}{note}",
                date.to_string(),
                clip(&record.medical_record_number, 9),
                clip(&record.patient_name, 21),
                clip(&record.blood_group, 5),
                clip(&record.requested_component, 15),
                clip(&record.volume_or_units, 7),
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{:>66}", "Printed by,");
        let _ = writeln!(out);
        let _ = writeln!(out);
        let _ = writeln!(out, "{:>70}", "Blood Bank Officer");
        out
    }
}

/// A ten-cell proportion bar.
fn bar(count: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (count * 10).div_ceil(total)
    };
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}

fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn record(
        year: i32,
        month: u32,
        day: u32,
        group: &str,
        component: &str,
        priority: Priority,
    ) -> RequestRecord {
        let created_at = Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        RequestRecord {
            id: Uuid::new_v4(),
            patient_name: "Budi".to_string(),
            medical_record_number: "7788".to_string(),
            requested_component: component.to_string(),
            ward: "-".to_string(),
            volume_or_units: "2".to_string(),
            referring_physician: "-".to_string(),
            clinical_diagnosis: "-".to_string(),
            blood_group: group.to_string(),
            rhesus_factor: "-".to_string(),
            priority,
            created_at,
        }
    }

    #[test]
    fn filters_by_month_and_year_exactly() {
        let records = vec![
            record(2024, 3, 5, "O", "PRC", Priority::Routine),
            record(2024, 3, 20, "A", "WB", Priority::Urgent),
            record(2024, 4, 1, "O", "PRC", Priority::Routine),
            record(2023, 3, 5, "B", "TC", Priority::Routine),
        ];

        let report = MonthlyReport::build(&records, 2024, 3);
        assert_eq!(report.total, 2);
        assert_eq!(report.urgent, 1);
        assert_eq!(report.routine, 1);
    }

    #[test]
    fn distribution_sums_equal_total() {
        let records = vec![
            record(2024, 3, 1, "O", "PRC", Priority::Routine),
            record(2024, 3, 2, "O", "WB", Priority::Urgent),
            record(2024, 3, 3, "A", "PRC", Priority::Routine),
            record(2024, 3, 4, "AB", "FFP", Priority::Urgent),
        ];

        let report = MonthlyReport::build(&records, 2024, 3);
        assert_eq!(report.by_blood_group.values().sum::<usize>(), report.total);
        assert_eq!(report.by_component.values().sum::<usize>(), report.total);
        assert_eq!(report.urgent + report.routine, report.total);
    }

    #[test]
    fn rows_sorted_oldest_first() {
        let records = vec![
            record(2024, 3, 20, "O", "PRC", Priority::Routine),
            record(2024, 3, 5, "A", "WB", Priority::Routine),
        ];

        let report = MonthlyReport::build(&records, 2024, 3);
        assert_eq!(report.rows[0].blood_group, "A");
        assert_eq!(report.rows[1].blood_group, "O");
    }

    #[test]
    fn average_divides_by_thirty_always() {
        let records: Vec<_> = (1..=15)
            .map(|day| record(2024, 2, day, "O", "PRC", Priority::Routine))
            .collect();

        // February 2024 has 29 days; the denominator stays 30.
        let report = MonthlyReport::build(&records, 2024, 2);
        assert!((report.average_per_day() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_months_are_clamped() {
        let records = vec![record(2024, 1, 5, "O", "PRC", Priority::Routine)];

        let report = MonthlyReport::build(&records, 2024, 0);
        assert_eq!(report.month(), 1);
        assert_eq!(report.period(), "January 2024");
        assert_eq!(report.total, 1);

        assert_eq!(MonthlyReport::build(&[], 2024, 13).period(), "December 2024");
    }

    #[test]
    fn empty_period_reports_zeroes() {
        let report = MonthlyReport::build(&[], 2024, 3);
        assert_eq!(report.total, 0);
        assert!(report.by_blood_group.is_empty());
        assert!((report.average_per_day()).abs() < f64::EPSILON);
        assert!(report.render().contains("no data for this period"));
    }

    #[test]
    fn rendering_carries_period_and_detail() {
        let records = vec![record(2024, 3, 5, "O", "PRC", Priority::Urgent)];
        let page = MonthlyReport::build(&records, 2024, 3).render();

        assert!(page.contains("Period: March 2024"));
        assert!(page.contains("CITO"));
        assert!(page.contains("7788"));
        assert!(page.contains("Blood Bank Officer"));
    }
}
