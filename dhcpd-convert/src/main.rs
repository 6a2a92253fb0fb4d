use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use dhcpd_convert::inspect::render_model;
use dhcpd_convert::parse_config;

mod cli;
mod convert;
mod path_guard;

use cli::{Cli, Command, InspectArgs, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Command::Convert(args) => convert::run_convert(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let model =
        parse_config(&text).with_context(|| format!("failed to parse {}", args.file.display()))?;

    match args.format {
        OutputFormat::Text => print!("{}", render_model(&model, args.depth)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&model)?),
    }
    Ok(())
}
