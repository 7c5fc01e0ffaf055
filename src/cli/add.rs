use std::path::Path;

use donorlabel::{domain::DraftUpdate, print::StdoutSpool};
use tracing::instrument;

use super::{FieldArgs, terminal::Colorize};

#[derive(Debug, clap::Parser)]
#[command(about = "Register a new blood-product request")]
pub struct Add {
    /// Patient name
    #[arg(long)]
    patient: String,

    /// Medical record number
    #[arg(long)]
    mrn: String,

    #[command(flatten)]
    fields: FieldArgs,

    /// Print one copy immediately, bypassing the settings prompt
    #[arg(long)]
    auto_print: bool,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut app = super::open_app(root);
        if self.auto_print {
            app.set_auto_print(true);
        }

        let urgent = self.fields.urgent;
        app.update_draft(DraftUpdate {
            patient_name: Some(self.patient),
            medical_record_number: Some(self.mrn),
            ..self.fields.into_update()
        });

        let mut spool = StdoutSpool;
        let Some(id) = app.add(&mut spool) else {
            anyhow::bail!("patient name and MRN must not be blank");
        };

        if urgent {
            println!("{}", "CITO request registered".alert());
        }
        println!("Added request {id}");
        Ok(())
    }
}
