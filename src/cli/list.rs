use std::path::Path;

use chrono::Local;
use donorlabel::{
    Priority, RequestRecord,
    storage::{HISTORY_FILE, HistoryStore},
};
use tracing::instrument;

use super::terminal::Colorize;

/// Command arguments for `donorlabel list`.
#[derive(Debug, Default, clap::Parser)]
#[command(about = "List the request history, newest first")]
pub struct List {
    /// Search term: patient name or MRN substring
    #[arg(long, short)]
    search: Option<String>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Limit number of rows returned.
    #[arg(long)]
    limit: Option<usize>,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = HistoryStore::open(root.join(HISTORY_FILE));
        let query = self.search.unwrap_or_default();
        let mut rows = store.search(&query);
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Table => print_table(&rows, store.len()),
        }
        Ok(())
    }
}

fn print_table(rows: &[&RequestRecord], total: usize) {
    if total == 0 {
        println!("{}", "No requests recorded yet.".dim());
        return;
    }
    if rows.is_empty() {
        println!("{}", "No matching requests.".dim());
        return;
    }

    println!(
        "{:<18}{:<12}{:<24}{:<6}{:<18}{}",
        "CREATED", "MRN", "PATIENT", "GRP", "COMPONENT", "PRIORITY"
    );
    for record in rows {
        let created = record
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");
        let priority = match record.priority {
            Priority::Urgent => "CITO".alert(),
            Priority::Routine => "routine".dim(),
        };
        println!(
            "{:<18}{:<12}{:<24}{:<6}{:<18}{priority}",
            created.to_string(),
            clip(&record.medical_record_number, 11),
            clip(&record.patient_name, 23),
            clip(&record.blood_group, 5),
            clip(&record.requested_component, 17),
        );
    }
    println!("{}", format!("{} of {total} request(s)", rows.len()).dim());
}

fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
