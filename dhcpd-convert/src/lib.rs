//! ISC dhcpd configuration to Windows DHCP Server conversion.
//!
//! The library turns the text of a `dhcpd.conf` into an ordered list of
//! provisioning [`Command`]s: scopes, option definitions, scope option values
//! and reservations. Rendering those commands is a separate step.
//!
//! # Pipeline
//!
//! 1. [`builder`] scans the text with the line and block primitives from
//!    `brace-conf-core`, matching lines against [`grammar`], and produces a
//!    [`ConfigModel`]
//! 2. [`synth`] walks the model's subnets, using [`address`] for netmask and
//!    range arithmetic and [`option_map`] for option codes
//! 3. [`powershell`] renders the commands as cmdlets; [`summary`] and
//!    [`inspect`] report on the run and the model
//!
//! # Lossy behavior
//!
//! Two things are dropped or approximated without failing the run and are
//! reported as [`synth::LossyNote`]s instead:
//!
//! - a subnet with several `range` statements becomes one scope spanning the
//!   lowest start to the highest end, gaps included
//! - subnet options missing from the option map are not emitted
//!
//! Global settings, option spaces, option definitions and classes are parsed
//! into the model but produce no commands.
//!
//! # Examples
//!
//! ```ignore
//! use dhcpd_convert::{convert, option_map::OptionMap, powershell};
//!
//! let text = std::fs::read_to_string("dhcpd.conf")?;
//! let synthesis = convert(&text, &OptionMap::default())?;
//! for note in &synthesis.notes {
//!     eprintln!("warning: {note}");
//! }
//! print!("{}", powershell::render(&synthesis.commands));
//! ```

pub mod address;
pub mod builder;
pub mod command;
pub mod grammar;
pub mod inspect;
pub mod model;
pub mod option_map;
pub mod powershell;
pub mod summary;
pub mod synth;

pub use builder::{parse_config, BlockKind, ParseError};
pub use command::Command;
pub use model::ConfigModel;
pub use synth::{synthesize, ConvertError, Synthesis};

use crate::option_map::OptionMap;

/// Any failure of [`convert`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Parse configuration text and synthesize its command sequence.
///
/// Each call starts from fresh state, so repeated runs over the same input
/// yield identical results.
pub fn convert(input: &str, options: &OptionMap) -> Result<Synthesis, Error> {
    let model = parse_config(input)?;
    Ok(synthesize(&model, options)?)
}
