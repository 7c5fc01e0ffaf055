use std::path::Path;

use donorlabel::{
    Config,
    domain::{CONFIG_FILE, Draft, DraftUpdate},
    render::PrintMode,
};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(about = "Render a label or form without saving anything")]
pub struct Preview {
    /// Patient name
    #[arg(long)]
    patient: Option<String>,

    /// Medical record number
    #[arg(long)]
    mrn: Option<String>,

    #[command(flatten)]
    fields: super::FieldArgs,

    /// Document to render (default: configured mode)
    #[arg(long, value_enum)]
    mode: Option<PrintMode>,

    /// Render scale, clamped to 0.5-2.0
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

impl Preview {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config = Config::load_or_default(&root.join(CONFIG_FILE));
        let mode = self.mode.unwrap_or(config.default_mode);

        let mut draft = Draft::default();
        draft.update(DraftUpdate {
            patient_name: self.patient,
            medical_record_number: self.mrn,
            ..self.fields.into_update()
        });

        print!("{}", mode.render(&draft.preview(), self.scale));
        Ok(())
    }
}
