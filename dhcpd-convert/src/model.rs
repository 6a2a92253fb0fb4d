//! Structured model recovered from a dhcpd configuration file.
//!
//! Everything is built in one top-to-bottom pass by [`crate::builder`] and is
//! not mutated afterwards. Addresses are kept as the raw dotted-quad text found
//! in the file; [`crate::address`] validates them when scopes are computed.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigModel {
    /// Top-level settings keyed by setting name or `option <name>`. Last wins.
    pub globals: BTreeMap<String, String>,
    /// Declared option spaces.
    pub option_spaces: BTreeSet<String>,
    /// Option definitions in declaration order, duplicates retained.
    pub option_definitions: Vec<OptionDefinition>,
    /// Class bodies, kept as opaque text.
    pub classes: BTreeMap<String, String>,
    /// Shared-network names in file order, including networks without subnets.
    pub shared_networks: Vec<String>,
    /// Every subnet of every shared network, in discovery order.
    pub subnets: Vec<Subnet>,
}

impl ConfigModel {
    /// Record a parsed shared network and flatten its subnets into the model.
    pub fn push_shared_network(&mut self, network: SharedNetwork) {
        self.shared_networks.push(network.name);
        self.subnets.extend(network.subnets);
    }

    /// Subnets that came from the named shared network.
    pub fn subnets_of<'a>(&'a self, network: &'a str) -> impl Iterator<Item = &'a Subnet> + 'a {
        self.subnets
            .iter()
            .filter(move |subnet| subnet.shared_network == network)
    }
}

/// `option <space>.<name> code <n> = <type>;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDefinition {
    pub space: String,
    pub name: String,
    pub code: u32,
    /// Raw type expression, e.g. `array of ip-address`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// A shared network while it is being parsed. It owns its subnets until
/// [`ConfigModel::push_shared_network`] flattens them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedNetwork {
    pub name: String,
    pub subnets: Vec<Subnet>,
}

/// `subnet <addr> netmask <mask> { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subnet {
    pub address: String,
    pub netmask: String,
    /// Name of the shared network that contained this subnet.
    pub shared_network: String,
    /// 1-based line of the `subnet` declaration.
    pub line: usize,
    pub ranges: Vec<AddressRange>,
    pub options: SubnetOptions,
    pub hosts: Vec<Host>,
}

impl Subnet {
    pub fn new(
        address: impl Into<String>,
        netmask: impl Into<String>,
        shared_network: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            address: address.into(),
            netmask: netmask.into(),
            shared_network: shared_network.into(),
            line,
            ranges: Vec::new(),
            options: SubnetOptions::default(),
            hosts: Vec::new(),
        }
    }
}

/// `range <start> <end>;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressRange {
    pub start: String,
    pub end: String,
}

/// `host <name> { ... }`. Missing fields stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Host {
    pub name: String,
    pub fixed_address: String,
    pub hardware_ethernet: String,
}

/// Subnet-scoped `option <name> <value>;` entries.
///
/// Names are unique. Re-setting a name replaces the value but keeps the
/// position of its first occurrence, which is the order options are emitted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubnetOptions {
    entries: Vec<(String, String)>,
}

impl SubnetOptions {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SubnetOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigModel, SharedNetwork, Subnet, SubnetOptions};

    #[test]
    fn repeated_option_overwrites_in_place() {
        let mut options = SubnetOptions::default();
        options.set("routers", "10.0.0.1");
        options.set("domain-name", "\"corp.local\"");
        options.set("routers", "10.0.0.254");

        let collected: Vec<_> = options.iter().collect();
        assert_eq!(
            collected,
            vec![("routers", "10.0.0.254"), ("domain-name", "\"corp.local\"")]
        );
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn flattening_keeps_empty_networks_and_order() {
        let mut model = ConfigModel::default();
        model.push_shared_network(SharedNetwork {
            name: "Empty".to_string(),
            subnets: Vec::new(),
        });
        model.push_shared_network(SharedNetwork {
            name: "Office".to_string(),
            subnets: vec![
                Subnet::new("10.0.0.0", "255.255.255.0", "Office", 3),
                Subnet::new("10.0.1.0", "255.255.255.0", "Office", 7),
            ],
        });

        assert_eq!(model.shared_networks, vec!["Empty", "Office"]);
        assert_eq!(model.subnets_of("Office").count(), 2);
        assert_eq!(model.subnets_of("Empty").count(), 0);
        assert_eq!(model.subnets[1].address, "10.0.1.0");
    }
}
