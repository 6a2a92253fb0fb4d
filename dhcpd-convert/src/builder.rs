//! Build a [`ConfigModel`] from raw dhcpd configuration text.
//!
//! The top level is scanned line by line against [`grammar::match_top_level`].
//! Class and shared-network openers hand off to the balanced block extractor
//! from `brace-conf-core`; shared-network bodies are then parsed by a small
//! two-state machine (outside / inside a subnet), and host blocks inside a
//! subnet reuse the same extractor.

use std::fmt::{self, Display, Formatter};

use brace_conf_core::{extract, is_skippable, split_lines, Block};
use thiserror::Error;

use crate::grammar::{self, HostField, SubnetLine, TopLevel};
use crate::model::{AddressRange, ConfigModel, Host, OptionDefinition, SharedNetwork, Subnet};

/// Which kind of block a structural error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Class,
    SharedNetwork,
    Subnet,
    Host,
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Class => "class",
            BlockKind::SharedNetwork => "shared-network",
            BlockKind::Subnet => "subnet",
            BlockKind::Host => "host",
        };
        f.write_str(name)
    }
}

/// Structural errors that abort the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A block opened at `line` (1-based) was still open at end of input.
    #[error("unterminated {kind} block '{name}' opened at line {line}")]
    UnterminatedBlock {
        kind: BlockKind,
        name: String,
        line: usize,
    },
}

/// Parse configuration text into a [`ConfigModel`].
///
/// No partial model is returned on error.
pub fn parse_config(input: &str) -> Result<ConfigModel, ParseError> {
    let lines = split_lines(input);
    let mut model = ConfigModel::default();
    let mut index = 0;

    while index < lines.len() {
        let raw = lines[index];
        if is_skippable(raw) {
            index += 1;
            continue;
        }
        let line = raw.trim();

        let Some(matched) = grammar::match_top_level(line) else {
            tracing::debug!(line = index + 1, text = line, "skipping unrecognized line");
            index += 1;
            continue;
        };

        match matched {
            TopLevel::OptionSpace(name) => {
                model.option_spaces.insert(name.to_string());
                index += 1;
            }
            TopLevel::OptionDefinition {
                space,
                name,
                code,
                kind,
            } => {
                model.option_definitions.push(OptionDefinition {
                    space: space.to_string(),
                    name: name.to_string(),
                    code,
                    kind: kind.to_string(),
                });
                index += 1;
            }
            TopLevel::Class(name) => {
                let block = open_block(&lines, index, BlockKind::Class, name)?;
                model.classes.insert(name.to_string(), block.text());
                index = block.next;
            }
            TopLevel::GlobalSetting { key, value } => {
                model.globals.insert(key, value.to_string());
                index += 1;
            }
            TopLevel::SharedNetwork(name) => {
                let block = open_block(&lines, index, BlockKind::SharedNetwork, &name)?;
                let subnets = parse_subnets(&name, block.lines, block.start)?;
                tracing::debug!(
                    network = %name,
                    subnets = subnets.len(),
                    "parsed shared-network"
                );
                model.push_shared_network(SharedNetwork { name, subnets });
                index = block.next;
            }
        }
    }

    Ok(model)
}

/// Extract the block opened on `lines[opener]`, mapping a missing close brace
/// to a [`ParseError`] that names the opener.
fn open_block<'a>(
    lines: &'a [&'a str],
    opener: usize,
    kind: BlockKind,
    name: &str,
) -> Result<Block<'a>, ParseError> {
    extract(lines, opener + 1).map_err(|_| ParseError::UnterminatedBlock {
        kind,
        name: name.to_string(),
        line: opener + 1,
    })
}

enum SubnetState {
    Outside,
    Inside(Subnet),
}

/// Parse the body of one shared network. `offset` is the index of `lines[0]`
/// in the whole file, used for line numbers.
fn parse_subnets(network: &str, lines: &[&str], offset: usize) -> Result<Vec<Subnet>, ParseError> {
    let mut subnets = Vec::new();
    let mut state = SubnetState::Outside;
    let mut index = 0;

    while index < lines.len() {
        let raw = lines[index];
        if is_skippable(raw) {
            index += 1;
            continue;
        }
        let line = raw.trim();

        state = match state {
            SubnetState::Outside => match grammar::match_subnet_open(line) {
                Some((address, netmask)) => {
                    SubnetState::Inside(Subnet::new(address, netmask, network, offset + index + 1))
                }
                None => {
                    tracing::debug!(
                        line = offset + index + 1,
                        text = line,
                        "skipping line outside subnet"
                    );
                    SubnetState::Outside
                }
            },
            SubnetState::Inside(mut subnet) => match grammar::match_subnet_line(line) {
                Some(SubnetLine::Option { name, value }) => {
                    subnet.options.set(name, value);
                    SubnetState::Inside(subnet)
                }
                Some(SubnetLine::Range { start, end }) => {
                    subnet.ranges.push(AddressRange {
                        start: start.to_string(),
                        end: end.to_string(),
                    });
                    SubnetState::Inside(subnet)
                }
                Some(SubnetLine::Host(name)) => {
                    // Only reachable when `lines` is not itself a balanced
                    // shared-network body.
                    let block = extract(lines, index + 1).map_err(|_| {
                        ParseError::UnterminatedBlock {
                            kind: BlockKind::Host,
                            name: name.clone(),
                            line: offset + index + 1,
                        }
                    })?;
                    subnet.hosts.push(parse_host(name, block.body()));
                    index = block.next;
                    state = SubnetState::Inside(subnet);
                    continue;
                }
                Some(SubnetLine::Close) => {
                    subnets.push(subnet);
                    SubnetState::Outside
                }
                None => {
                    tracing::debug!(
                        line = offset + index + 1,
                        text = line,
                        "ignoring unsupported subnet directive"
                    );
                    SubnetState::Inside(subnet)
                }
            },
        };
        index += 1;
    }

    match state {
        SubnetState::Outside => Ok(subnets),
        SubnetState::Inside(subnet) => Err(ParseError::UnterminatedBlock {
            kind: BlockKind::Subnet,
            name: subnet.address,
            line: subnet.line,
        }),
    }
}

/// Read `fixed-address` and `hardware ethernet` from a host body. Lines that
/// close a nested block are not matched against the field rules.
fn parse_host(name: String, body: &[&str]) -> Host {
    let mut host = Host {
        name,
        ..Host::default()
    };

    for raw in body {
        if is_skippable(raw) || raw.contains('}') {
            continue;
        }
        match grammar::match_host_field(raw.trim()) {
            Some(HostField::FixedAddress(address)) => host.fixed_address = address.to_string(),
            Some(HostField::HardwareEthernet(mac)) => host.hardware_ethernet = mac.to_string(),
            None => {}
        }
    }

    host
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{parse_config, parse_subnets, BlockKind, ParseError};
    use crate::model::{AddressRange, Host};

    const OFFICE: &str = r#"
# Office network
ddns-update-style none;
default-lease-time 600;
option domain-name "corp.local";
option space MSFT;
option MSFT.release-on-shutdown code 2 = unsigned integer 32;

class "voip" {
  match if substring(option vendor-class-identifier, 0, 4) = "Snom";
}

shared-network "Office" {
  subnet 10.0.0.0 netmask 255.255.255.0 {
    range 10.0.0.10 10.0.0.200;
    option domain-name-servers "8.8.8.8","1.1.1.1";
    option routers 10.0.0.1;
    next-server 10.0.0.2;
    host "pc1" {
      hardware ethernet 00:11:22:33:44:55;
      fixed-address 10.0.0.50;
    }
  }
}
"#;

    #[test]
    fn builds_full_model() {
        let model = parse_config(OFFICE).expect("parse");

        assert_eq!(model.globals.get("ddns-update-style").map(String::as_str), Some("none"));
        assert_eq!(
            model.globals.get("option domain-name").map(String::as_str),
            Some("\"corp.local\"")
        );
        assert!(model.option_spaces.contains("MSFT"));
        assert_eq!(model.option_definitions.len(), 1);
        assert_eq!(model.option_definitions[0].code, 2);
        assert!(model.classes["voip"].contains("vendor-class-identifier"));
        assert_eq!(model.shared_networks, vec!["Office"]);

        let subnet = &model.subnets[0];
        assert_eq!(subnet.address, "10.0.0.0");
        assert_eq!(subnet.shared_network, "Office");
        assert_eq!(subnet.line, 14);
        assert_eq!(
            subnet.ranges,
            vec![AddressRange {
                start: "10.0.0.10".to_string(),
                end: "10.0.0.200".to_string(),
            }]
        );
        assert_eq!(
            subnet.options.get("domain-name-servers"),
            Some("\"8.8.8.8\",\"1.1.1.1\"")
        );
        assert_eq!(subnet.options.len(), 2);
        assert_eq!(
            subnet.hosts,
            vec![Host {
                name: "pc1".to_string(),
                fixed_address: "10.0.0.50".to_string(),
                hardware_ethernet: "00:11:22:33:44:55".to_string(),
            }]
        );
    }

    #[test]
    fn duplicate_option_definitions_are_all_kept() {
        let model = parse_config(
            "option space A;\noption A.x code 1 = text;\noption A.x code 1 = text;\n",
        )
        .expect("parse");
        assert_eq!(model.option_definitions.len(), 2);
    }

    #[test]
    fn last_global_setting_wins() {
        let model =
            parse_config("max-lease-time 100;\nmax-lease-time 7200;\n").expect("parse");
        assert_eq!(model.globals["max-lease-time"], "7200");
    }

    #[test]
    fn host_without_fields_is_kept_empty() {
        let model = parse_config(
            "shared-network n {\n subnet 10.1.0.0 netmask 255.255.0.0 {\n  host ghost {\n  }\n }\n}\n",
        )
        .expect("parse");
        assert_eq!(
            model.subnets[0].hosts,
            vec![Host {
                name: "ghost".to_string(),
                ..Host::default()
            }]
        );
    }

    #[test]
    fn empty_shared_network_is_recorded_without_subnets() {
        let model = parse_config("shared-network idle {\n}\n").expect("parse");
        assert_eq!(model.shared_networks, vec!["idle"]);
        assert!(model.subnets.is_empty());
    }

    #[test]
    fn multiple_subnets_keep_declaration_order() {
        let model = parse_config(
            "shared-network a {\n subnet 10.0.1.0 netmask 255.255.255.0 {\n }\n subnet 10.0.0.0 netmask 255.255.255.0 {\n }\n}\nshared-network b {\n subnet 10.0.2.0 netmask 255.255.255.0 {\n }\n}\n",
        )
        .expect("parse");
        let order: Vec<_> = model
            .subnets
            .iter()
            .map(|s| (s.shared_network.as_str(), s.address.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("a", "10.0.1.0"), ("a", "10.0.0.0"), ("b", "10.0.2.0")]
        );
    }

    #[test]
    fn unterminated_shared_network_fails() {
        let err = parse_config("authoritative;\nshared-network X {\n subnet 10.0.0.0 netmask 255.0.0.0 {\n }\n")
            .expect_err("missing close");
        assert_eq!(
            err,
            ParseError::UnterminatedBlock {
                kind: BlockKind::SharedNetwork,
                name: "X".to_string(),
                line: 2,
            }
        );
    }

    #[test]
    fn unterminated_class_fails() {
        let err = parse_config("class \"c\" {\n match if true;\n").expect_err("missing close");
        assert!(matches!(
            err,
            ParseError::UnterminatedBlock {
                kind: BlockKind::Class,
                line: 1,
                ..
            }
        ));
    }

    #[test]
    fn subnet_left_open_inside_network_fails() {
        // One-line braces keep the network balanced while the host block
        // consumes the network's closing line.
        let err = parse_config(
            "shared-network n {\n subnet 10.0.0.0 netmask 255.0.0.0 { }\n  host h { }\n}\n",
        )
        .expect_err("subnet never closes");
        assert_eq!(
            err,
            ParseError::UnterminatedBlock {
                kind: BlockKind::Subnet,
                name: "10.0.0.0".to_string(),
                line: 2,
            }
        );
    }

    #[test]
    fn comment_open_brace_keeps_network_open() {
        let err = parse_config(
            "shared-network n {\n  # legacy {\n  subnet 10.0.0.0 netmask 255.255.255.0 {\n  }\n}\n",
        )
        .expect_err("comment brace counts");
        assert_eq!(
            err,
            ParseError::UnterminatedBlock {
                kind: BlockKind::SharedNetwork,
                name: "n".to_string(),
                line: 1,
            }
        );
    }

    #[test]
    fn comment_close_brace_ends_network() {
        let model = parse_config(
            "shared-network n {\n  # }\n  subnet 10.0.0.0 netmask 255.255.255.0 {\n    option routers 10.0.0.1;\n  }\n}\n",
        )
        .expect("parse");
        assert_eq!(model.shared_networks, vec!["n"]);
        assert!(model.subnets.is_empty());
        assert_eq!(
            model.globals.get("option routers").map(String::as_str),
            Some("10.0.0.1")
        );
    }

    #[test]
    fn host_running_past_body_fails() {
        let lines = [" subnet 10.0.0.0 netmask 255.0.0.0 {", "  host h {", "    fixed-address 10.0.0.5;"];
        let err = parse_subnets("n", &lines, 4).expect_err("host never closes");
        assert_eq!(
            err,
            ParseError::UnterminatedBlock {
                kind: BlockKind::Host,
                name: "h".to_string(),
                line: 6,
            }
        );
    }
}
