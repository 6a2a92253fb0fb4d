//! Line rules for the supported dhcpd grammar subset.
//!
//! Each rule looks at one trimmed, non-comment line. Top-level rules are held
//! in a fixed-order table and the first rule that matches wins; lines that
//! match nothing are not an error and are skipped by the caller.

use std::sync::LazyLock;

use regex::Regex;

static OPTION_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^option\s+space\s+(\w+);").expect("valid regex"));

static OPTION_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^option\s+(\S+)\.(\S+)\s+code\s+(\d+)\s*=\s*(.*);").expect("valid regex")
});

static CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^class\s+"([^"]+)"\s*\{"#).expect("valid regex"));

static GLOBAL_SETTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(ddns-update-style|authoritative|default-lease-time|max-lease-time|option\s+\S+)\s+(.*);",
    )
    .expect("valid regex")
});

static SHARED_NETWORK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^shared-network\s+(\S+)\s*\{").expect("valid regex"));

static SUBNET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^subnet\s+(\d+\.\d+\.\d+\.\d+)\s+netmask\s+(\d+\.\d+\.\d+\.\d+)\s*\{")
        .expect("valid regex")
});

static SUBNET_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^option\s+(\S+)\s+(.*);").expect("valid regex"));

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^range\s+(\d+\.\d+\.\d+\.\d+)\s+(\d+\.\d+\.\d+\.\d+);").expect("valid regex")
});

static HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^host\s+(\S+)\s*\{").expect("valid regex"));

static FIXED_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fixed-address\s+(\S+);").expect("valid regex"));

static HARDWARE_ETHERNET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^hardware ethernet\s+(\S+);").expect("valid regex"));

/// A recognized top-level line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevel<'a> {
    OptionSpace(&'a str),
    OptionDefinition {
        space: &'a str,
        name: &'a str,
        code: u32,
        kind: &'a str,
    },
    /// Opens a class block; the body follows on later lines.
    Class(&'a str),
    GlobalSetting { key: String, value: &'a str },
    /// Opens a shared-network block; the body follows on later lines.
    SharedNetwork(String),
}

type Rule = for<'a> fn(&'a str) -> Option<TopLevel<'a>>;

/// Priority order matters: option definitions must be tried before the
/// global-setting rule, whose `option <token> <value>;` alternative would
/// otherwise swallow them.
const TOP_LEVEL_RULES: [(&str, Rule); 5] = [
    ("option-space", option_space),
    ("option-definition", option_definition),
    ("class", class),
    ("global-setting", global_setting),
    ("shared-network", shared_network),
];

/// Match a top-level line against the rule table.
pub fn match_top_level(line: &str) -> Option<TopLevel<'_>> {
    TOP_LEVEL_RULES.iter().find_map(|(rule, matcher)| {
        let matched = matcher(line);
        if matched.is_some() {
            tracing::trace!(rule, line, "matched top-level rule");
        }
        matched
    })
}

fn option_space(line: &str) -> Option<TopLevel<'_>> {
    let caps = OPTION_SPACE.captures(line)?;
    Some(TopLevel::OptionSpace(caps.get(1)?.as_str()))
}

fn option_definition(line: &str) -> Option<TopLevel<'_>> {
    let caps = OPTION_DEFINITION.captures(line)?;
    Some(TopLevel::OptionDefinition {
        space: caps.get(1)?.as_str(),
        name: caps.get(2)?.as_str(),
        code: caps.get(3)?.as_str().parse().ok()?,
        kind: caps.get(4)?.as_str(),
    })
}

fn class(line: &str) -> Option<TopLevel<'_>> {
    let caps = CLASS.captures(line)?;
    Some(TopLevel::Class(caps.get(1)?.as_str()))
}

fn global_setting(line: &str) -> Option<TopLevel<'_>> {
    let caps = GLOBAL_SETTING.captures(line)?;
    let key = caps
        .get(1)?
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    Some(TopLevel::GlobalSetting {
        key,
        value: caps.get(2)?.as_str(),
    })
}

fn shared_network(line: &str) -> Option<TopLevel<'_>> {
    let caps = SHARED_NETWORK.captures(line)?;
    Some(TopLevel::SharedNetwork(unquote(caps.get(1)?.as_str())))
}

/// `subnet <addr> netmask <mask> {` returns `(addr, mask)`.
pub fn match_subnet_open(line: &str) -> Option<(&str, &str)> {
    let caps = SUBNET.captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// A recognized line inside an open subnet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubnetLine<'a> {
    Option { name: &'a str, value: &'a str },
    Range { start: &'a str, end: &'a str },
    /// Opens a host block; the body follows on later lines.
    Host(String),
    /// Any line containing `}` that matched nothing more specific.
    Close,
}

/// Match a line inside a subnet body. Tried in order: option, range, host,
/// close.
pub fn match_subnet_line(line: &str) -> Option<SubnetLine<'_>> {
    if let Some(caps) = SUBNET_OPTION.captures(line) {
        return Some(SubnetLine::Option {
            name: caps.get(1)?.as_str(),
            value: caps.get(2)?.as_str().trim(),
        });
    }
    if let Some(caps) = RANGE.captures(line) {
        return Some(SubnetLine::Range {
            start: caps.get(1)?.as_str(),
            end: caps.get(2)?.as_str(),
        });
    }
    if let Some(caps) = HOST.captures(line) {
        return Some(SubnetLine::Host(unquote(caps.get(1)?.as_str())));
    }
    if line.contains('}') {
        return Some(SubnetLine::Close);
    }
    None
}

/// A recognized field inside a host block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostField<'a> {
    FixedAddress(&'a str),
    HardwareEthernet(&'a str),
}

pub fn match_host_field(line: &str) -> Option<HostField<'_>> {
    if let Some(caps) = FIXED_ADDRESS.captures(line) {
        return Some(HostField::FixedAddress(caps.get(1)?.as_str()));
    }
    let caps = HARDWARE_ETHERNET.captures(line)?;
    Some(HostField::HardwareEthernet(caps.get(1)?.as_str()))
}

fn unquote(raw: &str) -> String {
    raw.trim_matches('"').to_string()
}
