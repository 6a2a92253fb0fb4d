//! Walk a parsed [`ConfigModel`] and emit the ordered [`Command`] sequence.
//!
//! Per subnet, in discovery order:
//!
//! 1. one scope, using [`address::scope_range`]
//! 2. one option value per mapped subnet option, preceded the first time a
//!    code needs it by that code's option definition
//! 3. one reservation per host
//!
//! All run state lives in a [`Synthesizer`] created per call, so independent
//! conversions never share "already defined" bookkeeping.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::net::Ipv4Addr;

use thiserror::Error;

use crate::address::{self, AddressError};
use crate::command::{client_id, option_values, Command};
use crate::model::{ConfigModel, Subnet};
use crate::option_map::OptionMap;

/// Errors that abort command synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("subnet {subnet} (line {line}): {source}")]
    Subnet {
        subnet: String,
        line: usize,
        source: AddressError,
    },
}

/// Information lost while mapping the model onto commands. Not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LossyNote {
    /// Several `range` statements were folded into one scope span.
    RangesCollapsed {
        subnet: String,
        ranges: usize,
        start: Ipv4Addr,
        end: Ipv4Addr,
    },
    /// A subnet option has no entry in the option map.
    OptionDropped { subnet: String, option: String },
}

impl Display for LossyNote {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LossyNote::RangesCollapsed {
                subnet,
                ranges,
                start,
                end,
            } => write!(
                f,
                "subnet {subnet} declares {ranges} ranges; scope spans {start}-{end} including any gaps between them"
            ),
            LossyNote::OptionDropped { subnet, option } => {
                write!(f, "subnet {subnet}: option '{option}' has no mapped code and was dropped")
            }
        }
    }
}

/// Result of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Synthesis {
    pub commands: Vec<Command>,
    /// Option codes whose definition was emitted during this run.
    pub defined_options: BTreeSet<u32>,
    pub notes: Vec<LossyNote>,
}

impl Synthesis {
    pub fn option_119_defined(&self) -> bool {
        self.defined_options.contains(&119)
    }
}

/// Emit the command sequence for `model`.
pub fn synthesize(model: &ConfigModel, options: &OptionMap) -> Result<Synthesis, ConvertError> {
    let mut synthesizer = Synthesizer::new(options);
    for subnet in &model.subnets {
        synthesizer.subnet(subnet)?;
    }
    Ok(synthesizer.finish())
}

/// Per-run state for [`synthesize`].
pub struct Synthesizer<'a> {
    options: &'a OptionMap,
    out: Synthesis,
}

impl<'a> Synthesizer<'a> {
    pub fn new(options: &'a OptionMap) -> Self {
        Self {
            options,
            out: Synthesis::default(),
        }
    }

    /// Emit scope, option and reservation commands for one subnet.
    pub fn subnet(&mut self, subnet: &Subnet) -> Result<(), ConvertError> {
        let range = address::scope_range(subnet).map_err(|source| ConvertError::Subnet {
            subnet: subnet.address.clone(),
            line: subnet.line,
            source,
        })?;

        if range.is_collapsed() {
            tracing::warn!(
                subnet = %subnet.address,
                ranges = range.merged,
                "multiple ranges collapsed into one scope"
            );
            self.out.notes.push(LossyNote::RangesCollapsed {
                subnet: subnet.address.clone(),
                ranges: range.merged,
                start: range.start,
                end: range.end,
            });
        }

        self.out.commands.push(Command::CreateScope {
            name: subnet.shared_network.clone(),
            start: range.start,
            end: range.end,
            mask: subnet.netmask.clone(),
        });

        for (name, raw) in subnet.options.iter() {
            self.option(subnet, name, raw);
        }

        for host in &subnet.hosts {
            self.out.commands.push(Command::CreateReservation {
                scope_id: subnet.address.clone(),
                address: host.fixed_address.clone(),
                client_id: client_id(&host.hardware_ethernet),
                name: host.name.clone(),
                description: host.name.clone(),
            });
        }

        Ok(())
    }

    fn option(&mut self, subnet: &Subnet, name: &str, raw: &str) {
        let Some(mapping) = self.options.lookup(name) else {
            tracing::warn!(subnet = %subnet.address, option = name, "dropping unmapped option");
            self.out.notes.push(LossyNote::OptionDropped {
                subnet: subnet.address.clone(),
                option: name.to_string(),
            });
            return;
        };

        if let Some(define) = &mapping.define {
            if self.out.defined_options.insert(mapping.code) {
                self.out.commands.push(Command::DefineOption {
                    id: mapping.code,
                    name: define.name.clone(),
                    kind: define.kind.clone(),
                });
            }
        }

        self.out.commands.push(Command::SetOptionValue {
            scope_id: subnet.address.clone(),
            option_id: mapping.code,
            values: option_values(raw),
        });
    }

    pub fn finish(self) -> Synthesis {
        self.out
    }
}
