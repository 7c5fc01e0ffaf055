use std::path::Path;

use chrono::Local;
use donorlabel::{
    CalendarMonth, Priority,
    storage::{HISTORY_FILE, HistoryStore},
    views::calendar::group_by_day,
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
#[command(about = "Browse request activity by calendar day")]
pub struct Calendar {
    /// Month to display, 1-12 (default: current)
    #[arg(long)]
    month: Option<u32>,

    /// Year to display (default: current)
    #[arg(long)]
    year: Option<i32>,

    /// Drill into one day of the month
    #[arg(long, value_name = "DAY")]
    day: Option<u32>,
}

impl Calendar {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = HistoryStore::open(root.join(HISTORY_FILE));
        let current = CalendarMonth::current();
        let month = CalendarMonth::new(
            self.year.unwrap_or_else(|| current.year()),
            self.month.unwrap_or_else(|| current.month()),
        );
        let groups = group_by_day(store.all());

        if let Some(day) = self.day {
            return day_view(&month, day, &groups);
        }

        println!("{:^56}", format!("{} {}", month.name(), month.year()));
        for name in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
            print!("{name:>7} ");
        }
        println!();

        let mut cells: Vec<String> =
            vec!["        ".to_string(); month.leading_blanks() as usize];
        for day in 1..=month.days() {
            let count = month
                .date(day)
                .and_then(|date| groups.get(&date))
                .map_or(0, Vec::len);
            let cell = if count == 0 {
                format!("{day:>7} ")
            } else {
                format!("{:>7} ", format!("{day}:{count}"))
            };
            cells.push(cell);
        }
        for week in cells.chunks(7) {
            println!("{}", week.concat());
        }
        println!();
        println!(
            "{}",
            "day:count marks days with requests; drill in with --day".dim()
        );
        Ok(())
    }
}

fn day_view(
    month: &CalendarMonth,
    day: u32,
    groups: &std::collections::BTreeMap<
        chrono::NaiveDate,
        Vec<&donorlabel::RequestRecord>,
    >,
) -> anyhow::Result<()> {
    let Some(date) = month.date(day) else {
        anyhow::bail!("{} {} has no day {day}", month.name(), month.year());
    };

    let records = groups.get(&date).map_or(&[][..], Vec::as_slice);
    println!("{} — {} request(s)", date.format("%d %B %Y"), records.len());
    for record in records {
        let time = record.created_at.with_timezone(&Local).format("%H:%M");
        let marker = match record.priority {
            Priority::Urgent => format!("  {}", "CITO".alert()),
            Priority::Routine => String::new(),
        };
        println!(
            "  {time}  {:<10} {:<22} {}{marker}",
            record.medical_record_number, record.patient_name, record.requested_component
        );
        println!("         re-print: donorlabel print --id {}", record.id);
    }
    Ok(())
}
