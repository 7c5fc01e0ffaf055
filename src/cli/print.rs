use std::path::Path;

use dialoguer::{Confirm, Input};
use donorlabel::{
    print::{PrintIntent, PrintSettings, SOFT_COPY_CAP, StdoutSpool},
    render::PrintMode,
};
use tracing::instrument;
use uuid::Uuid;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
#[command(about = "Re-print a historical request")]
pub struct Print {
    /// Record id to print
    #[arg(long, conflicts_with = "mrn")]
    id: Option<Uuid>,

    /// Medical record number; resolves to the newest matching record
    #[arg(long)]
    mrn: Option<String>,

    /// Number of copies; omit to be prompted
    #[arg(long)]
    copies: Option<usize>,

    /// Document to print (default: configured mode)
    #[arg(long, value_enum)]
    mode: Option<PrintMode>,

    /// Target a PDF instead of a physical printer
    #[arg(long)]
    pdf: bool,
}

impl Print {
    #[instrument(level = "debug", skip(self))]
    #[allow(clippy::cast_precision_loss)]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut app = super::open_app(root);
        if let Some(mode) = self.mode {
            app.set_print_mode(mode);
        }

        let id = match (self.id, &self.mrn) {
            (Some(id), _) => id,
            (None, Some(mrn)) => match app.store().find_by_mrn(mrn) {
                Some(record) => record.id,
                None => anyhow::bail!("no request with MRN {mrn}"),
            },
            (None, None) => anyhow::bail!("give --id or --mrn to select a request"),
        };

        let intent = if self.pdf {
            PrintIntent::SavePdf
        } else {
            PrintIntent::Print
        };
        if !app.initiate_print(Some(id), intent) {
            anyhow::bail!("no request with id {id}");
        }

        let copies = match self.copies {
            Some(copies) => copies,
            None => {
                let Some(copies) = prompt(app.print_mode(), intent)? else {
                    app.cancel_print();
                    println!("Cancelled.");
                    return Ok(());
                };
                copies
            }
        };

        let mut spool = StdoutSpool;
        if let Some(printed) = app.execute_print(copies as f64, &mut spool) {
            eprintln!("{}", format!("Spooled {printed} cop(y/ies)").success());
        }
        Ok(())
    }
}

/// Runs the print settings prompt; `None` means the operator backed out.
fn prompt(mode: PrintMode, intent: PrintIntent) -> anyhow::Result<Option<usize>> {
    let mut settings = PrintSettings::open(mode, intent);

    for line in settings.guidance() {
        println!("{}", line.info());
    }

    let input: String = Input::new()
        .with_prompt(format!("Copies (1-{SOFT_COPY_CAP})"))
        .default("1".to_string())
        .interact_text()?;
    settings.set_copies_input(&input);

    let question = match intent {
        PrintIntent::Print => "Print now",
        PrintIntent::SavePdf => "Continue to PDF",
    };
    let confirmed = Confirm::new()
        .with_prompt(question)
        .default(true)
        .interact()?;

    Ok(confirmed.then_some(settings.copies()))
}
