use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// How a dhcpd option name maps onto a destination option code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptionMapping {
    pub name: String,
    pub code: u32,
    /// Definition to create once per run before the first value is set, for
    /// codes the destination server does not know natively.
    #[serde(default)]
    pub define: Option<OptionDefinitionSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptionDefinitionSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Closed table of options carried into scope option values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<OptionMapping>,
}

impl OptionMap {
    pub fn new(entries: Vec<OptionMapping>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<&OptionMapping> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[OptionMapping] {
        &self.entries
    }
}

impl Default for OptionMap {
    fn default() -> Self {
        default_option_map()
    }
}

#[derive(Debug, Deserialize)]
struct OptionMapFile {
    option: Vec<OptionMapping>,
}

/// Errors returned when loading option map files.
#[derive(Debug, Error)]
pub enum OptionMapError {
    #[error("failed to read option map {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse option map {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load an option map from a TOML file.
pub fn load_option_map(path: &Path) -> Result<OptionMap, OptionMapError> {
    let raw = fs::read_to_string(path).map_err(|source| OptionMapError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_option_map(&raw, path.display().to_string())
}

/// Built-in option map.
pub fn default_option_map() -> OptionMap {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/mappings/options.toml"
    ));
    match parse_option_map(embedded, "embedded option map".to_string()) {
        Ok(map) if !map.entries.is_empty() => map,
        _ => fallback_option_map(),
    }
}

fn parse_option_map(raw: &str, path: String) -> Result<OptionMap, OptionMapError> {
    let parsed: OptionMapFile =
        toml::from_str(raw).map_err(|source| OptionMapError::Parse { path, source })?;
    Ok(OptionMap::new(parsed.option))
}

fn fallback_option_map() -> OptionMap {
    let plain = |name: &str, code: u32| OptionMapping {
        name: name.to_string(),
        code,
        define: None,
    };
    OptionMap::new(vec![
        plain("domain-name-servers", 6),
        plain("routers", 3),
        plain("domain-name", 15),
        OptionMapping {
            name: "domain-search".to_string(),
            code: 119,
            define: Some(OptionDefinitionSpec {
                name: "Domain Search List".to_string(),
                kind: "String".to_string(),
            }),
        },
    ])
}
