use std::path::Path;

use chrono::Datelike;
use donorlabel::{
    CalendarMonth, MonthlyReport,
    print::{PrintIntent, StdoutSpool},
    storage::{HISTORY_FILE, HistoryStore},
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
#[command(about = "Monthly recapitulation report")]
pub struct Report {
    /// Month to report on, 1-12 (default: current)
    #[arg(long)]
    month: Option<u32>,

    /// Year to report on (default: current)
    #[arg(long)]
    year: Option<i32>,

    /// Spool the printable full-page report instead of the summary
    #[arg(long)]
    print: bool,
}

impl Report {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let now = chrono::Local::now();
        let year = self.year.unwrap_or_else(|| now.year());
        let month = CalendarMonth::new(year, self.month.unwrap_or_else(|| now.month())).month();

        if self.print {
            // Route through the print cycle so the report page takes over
            // the surface exactly as a re-print would see it.
            let mut app = super::open_app(root);
            app.open_report(year, month);
            app.initiate_print(None, PrintIntent::Print);
            let mut spool = StdoutSpool;
            app.execute_print(1.0, &mut spool);
            return Ok(());
        }

        let store = HistoryStore::open(root.join(HISTORY_FILE));
        let report = MonthlyReport::build(store.all(), year, month);

        println!("{}", report.period().info());
        println!("  total   {}", report.total);
        println!(
            "  CITO    {}",
            if report.urgent > 0 {
                report.urgent.to_string().alert()
            } else {
                report.urgent.to_string()
            }
        );
        println!("  routine {}", report.routine);
        println!("  avg/day {:.1}", report.average_per_day());

        if !report.by_blood_group.is_empty() {
            println!();
            for (group, count) in &report.by_blood_group {
                println!("  {group:<4} {count}");
            }
        }
        if report.total == 0 {
            println!("{}", "  no requests in this period".dim());
        }
        println!();
        println!("{}", "full printable page: --print".dim());
        Ok(())
    }
}
