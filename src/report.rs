use chrono::{DateTime, Utc};
use comfy_table::Table;
use configuration::HorizonSettings;
use core_types::PlannedEconomy;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use uuid::Uuid;

/// Everything written to `--output`.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub job_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub settings: &'a HorizonSettings,
    pub product_names: Option<&'a [String]>,
    pub sector_names: Option<&'a [String]>,
    pub plan: &'a PlannedEconomy,
}

impl PlanReport<'_> {
    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// One row per planned period with the totals over sectors and products.
pub fn summary_table(plan: &PlannedEconomy) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Period",
        "Worked hours",
        "Activity",
        "Production",
        "Imports",
        "Surplus",
        "Export deficit",
    ]);

    for t in 0..plan.len() {
        let sum = |values: &[f64]| values.iter().sum::<f64>();
        table.add_row(vec![
            t.to_string(),
            format!("{:.3}", plan.worked_hours[t]),
            format!("{:.3}", sum(&plan.activity[t])),
            format!("{:.3}", sum(&plan.production[t])),
            format!("{:.3}", sum(&plan.total_import[t])),
            format!("{:.3}", sum(&plan.surplus[t])),
            format!("{:.3}", plan.export_deficit[t]),
        ]);
    }
    table
}
