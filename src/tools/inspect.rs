use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

use crate::config::load_game_data;

#[derive(Debug, Args)]
pub struct Opts {
    #[arg(short, long)]
    pub file: PathBuf,
    /// Format tag such as `pk3`; defaults to the file extension.
    #[arg(long)]
    pub format: Option<String>,
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Write the JSON summary here instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn run(opts: Opts) -> anyhow::Result<()> {
    let format = match opts.format {
        Some(format) => format,
        None => opts
            .file
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_owned)
            .with_context(|| {
                format!(
                    "No --format given and {} has no extension",
                    opts.file.display()
                )
            })?,
    };

    let game_data = load_game_data(opts.data_dir.as_deref())?;
    let record = std::fs::read(&opts.file)
        .with_context(|| format!("Failed to read {}", opts.file.display()))?;
    let summary = crate::summarize(&record, &format, &game_data)?;
    let json = serde_json::to_string_pretty(&summary)?;

    match opts.out {
        Some(out) => {
            log::info!("Writing summary to {}", out.display());
            std::fs::write(out, json)?;
        }
        None => println!("{json}"),
    }

    Ok(())
}
