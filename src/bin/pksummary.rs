use clap::{Parser, Subcommand};
use pksummary::tools::{formats, inspect, serve};

#[derive(Parser)]
struct Opts {
    #[command(subcommand)]
    tool: ToolOpts,
}

#[derive(Subcommand)]
enum ToolOpts {
    /// Summarize a single record file.
    Inspect(inspect::Opts),
    /// Answer base64 JSON requests read line by line from stdin.
    Serve(serve::Opts),
    /// List the supported record formats.
    Formats(formats::Opts),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    match opts.tool {
        ToolOpts::Inspect(opts) => inspect::run(opts),
        ToolOpts::Serve(opts) => serve::run(opts),
        ToolOpts::Formats(opts) => formats::run(opts),
    }
}
