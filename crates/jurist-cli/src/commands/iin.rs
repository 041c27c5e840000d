//! Offline IIN checksum verification.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use jurist_entity::lawyer::is_valid_national_id;

use crate::output::{self, OutputFormat};

/// Arguments for the iin command
#[derive(Debug, Args)]
pub struct IinArgs {
    /// One or more 12-digit IINs
    #[arg(required = true)]
    pub iins: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct IinRow {
    iin: String,
    valid: bool,
}

/// Check every IIN; fails when any of them is invalid.
pub fn execute(args: &IinArgs, format: OutputFormat) -> anyhow::Result<()> {
    let rows: Vec<IinRow> = args
        .iins
        .iter()
        .map(|iin| IinRow {
            iin: iin.clone(),
            valid: is_valid_national_id(iin.trim()),
        })
        .collect();
    output::print_list(&rows, format);

    let invalid = rows.iter().filter(|r| !r.valid).count();
    if invalid > 0 {
        anyhow::bail!("{invalid} of {} IIN(s) failed the checksum", rows.len());
    }
    Ok(())
}
