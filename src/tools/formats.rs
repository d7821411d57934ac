use clap::Args;
use prettytable::{format, row, Table};

use crate::format::FormatRegistry;

#[derive(Debug, Args)]
pub struct Opts {}

pub fn run(_opts: Opts) -> anyhow::Result<()> {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.add_row(row!["TAG", "GENERATION", "BYTES", "ENDIAN", "CIPHER"]);

    for descriptor in FormatRegistry::all() {
        table.add_row(row![
            descriptor.tag(),
            descriptor.format.generation(),
            descriptor.total_len,
            descriptor.endianness,
            descriptor.cipher,
        ]);
    }

    table.printstd();
    Ok(())
}
