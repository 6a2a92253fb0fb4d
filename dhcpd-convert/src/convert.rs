//! `convert` subcommand: read a dhcpd.conf, synthesize commands and write them.
//!
//! Lossy notes are printed as warnings on stderr. With `--output` the summary
//! goes to stdout; otherwise stdout carries only the rendered commands so it
//! can be piped straight into a script file.

use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::{ConvertArgs, RenderFormat};
use crate::path_guard::ensure_output_not_same;
use dhcpd_convert::option_map::{default_option_map, load_option_map};
use dhcpd_convert::summary::{render as render_summary, summarize};
use dhcpd_convert::{parse_config, powershell, synthesize, Synthesis};

pub fn run_convert(args: ConvertArgs) -> Result<()> {
    if let Some(output) = &args.output {
        ensure_output_not_same(output, &[args.input.as_path()])?;
    }

    let options = match &args.options_file {
        Some(path) => load_option_map(path)?,
        None => default_option_map(),
    };

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let model = parse_config(&text)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    let synthesis = synthesize(&model, &options)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;

    if !args.quiet {
        for note in &synthesis.notes {
            eprintln!("{} {note}", "warning:".yellow());
        }
    }

    let rendered = render(&synthesis, args.format)?;
    let summary = render_summary(summarize(&synthesis));

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write output {}", path.display()))?;
            if !args.quiet {
                println!("{}", summary.cyan());
            }
        }
        None => {
            print!("{rendered}");
            if !args.quiet {
                eprintln!("{}", summary.cyan());
            }
        }
    }

    Ok(())
}

fn render(synthesis: &Synthesis, format: RenderFormat) -> Result<String> {
    Ok(match format {
        RenderFormat::Powershell => powershell::render(&synthesis.commands),
        RenderFormat::Json => {
            let mut json = serde_json::to_string_pretty(&synthesis.commands)?;
            json.push('\n');
            json
        }
    })
}
