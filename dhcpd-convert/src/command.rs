use std::net::Ipv4Addr;

use serde::Serialize;

/// One provisioning step for the destination DHCP server, in emission order.
///
/// These are structured values; turning them into a concrete command language
/// is left to a renderer such as [`crate::powershell`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    CreateScope {
        name: String,
        start: Ipv4Addr,
        end: Ipv4Addr,
        mask: String,
    },
    DefineOption {
        id: u32,
        name: String,
        #[serde(rename = "type")]
        kind: String,
    },
    SetOptionValue {
        scope_id: String,
        option_id: u32,
        values: Vec<String>,
    },
    CreateReservation {
        scope_id: String,
        address: String,
        client_id: String,
        name: String,
        description: String,
    },
}

/// Normalize a `hardware ethernet` value into a client identifier:
/// separators removed, hex digits uppercased.
pub fn client_id(mac: &str) -> String {
    mac.chars()
        .filter(|c| *c != ':' && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

/// Split a raw option value into its list items. Quotes and semicolons are
/// dropped before splitting on commas.
pub fn option_values(raw: &str) -> Vec<String> {
    raw.replace(['"', ';'], "")
        .split(',')
        .map(|part| part.trim().to_string())
        .collect()
}
