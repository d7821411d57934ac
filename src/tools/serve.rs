use clap::Args;
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use crate::{config::load_game_data, data::GameData, transport};

#[derive(Debug, Args)]
pub struct Opts {
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

pub fn run(opts: Opts) -> anyhow::Result<()> {
    let game_data = load_game_data(opts.data_dir.as_deref())?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let handled = serve_lines(stdin.lock(), stdout.lock(), &game_data)?;
    log::info!("Input closed after {handled} requests");
    Ok(())
}

/// Answers each non-empty input line with one line of JSON. Returns the number of requests.
pub fn serve_lines(
    reader: impl BufRead,
    mut writer: impl Write,
    game_data: &GameData,
) -> io::Result<usize> {
    let mut handled = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = transport::handle_line(&line, game_data);
        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        handled += 1;
    }

    Ok(handled)
}
