use std::path::{Path, PathBuf};

mod add;
mod calendar;
mod list;
mod preview;
mod print;
mod report;
mod terminal;

use add::Add;
use calendar::Calendar;
use clap::ArgAction;
use donorlabel::{App, Config, Priority, domain::CONFIG_FILE, domain::DraftUpdate};
use list::List;
use preview::Preview;
use print::Print;
use report::Report;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the data directory (history and configuration)
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::List(List::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Register a new request
    Add(Add),
    /// List the request history (default)
    List(List),
    /// Browse activity by calendar day
    Calendar(Calendar),
    /// Monthly recapitulation report
    Report(Report),
    /// Re-print a historical request
    Print(Print),
    /// Render a label or form without saving anything
    Preview(Preview),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Add(cmd) => cmd.run(root),
            Self::List(cmd) => cmd.run(root),
            Self::Calendar(cmd) => cmd.run(root),
            Self::Report(cmd) => cmd.run(root),
            Self::Print(cmd) => cmd.run(root),
            Self::Preview(cmd) => cmd.run(root),
        }
    }
}

/// Opens the application state in `root` using the on-disk configuration.
fn open_app(root: &Path) -> App {
    let config = Config::load_or_default(&root.join(CONFIG_FILE));
    App::open(root, config)
}

/// Descriptive request fields shared by `add` and `preview`.
///
/// Patient name and MRN are deliberately not here: `add` requires them,
/// `preview` does not.
#[derive(Debug, Default, clap::Args)]
struct FieldArgs {
    /// Requested blood component (WB, PRC, TC, FFP, ...)
    #[arg(long)]
    component: Option<String>,

    /// Originating ward or unit
    #[arg(long)]
    ward: Option<String>,

    /// Volume or number of units
    #[arg(long)]
    volume: Option<String>,

    /// Referring physician
    #[arg(long)]
    physician: Option<String>,

    /// Clinical diagnosis
    #[arg(long)]
    diagnosis: Option<String>,

    /// ABO blood group
    #[arg(long)]
    blood_group: Option<String>,

    /// Rhesus factor
    #[arg(long)]
    rhesus: Option<String>,

    /// Flag the request CITO (urgent)
    #[arg(long)]
    urgent: bool,
}

impl FieldArgs {
    fn into_update(self) -> DraftUpdate {
        DraftUpdate {
            requested_component: self.component,
            ward: self.ward,
            volume_or_units: self.volume,
            referring_physician: self.physician,
            clinical_diagnosis: self.diagnosis,
            blood_group: self.blood_group,
            rhesus_factor: self.rhesus,
            priority: Some(if self.urgent {
                Priority::Urgent
            } else {
                Priority::Routine
            }),
            ..DraftUpdate::default()
        }
    }
}
