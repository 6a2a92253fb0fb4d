use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "dhcpd-convert")]
#[command(about = "Convert ISC dhcpd configuration into Windows DHCP Server commands")]
pub struct Cli {
    /// Log parser decisions to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert a dhcpd.conf into provisioning commands.
    Convert(ConvertArgs),
    /// Show the parsed structure of a dhcpd.conf.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// dhcpd configuration file to convert.
    pub input: PathBuf,
    /// Write commands to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = RenderFormat::Powershell)]
    pub format: RenderFormat,
    /// Option map TOML file replacing the built-in option codes.
    #[arg(long)]
    pub options_file: Option<PathBuf>,
    /// Suppress warnings and the summary line.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// dhcpd configuration file to inspect.
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum RenderFormat {
    Powershell,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
