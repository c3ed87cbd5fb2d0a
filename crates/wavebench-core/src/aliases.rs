//! Role alias tables used to recognise supply and output pins.
//!
//! Hints come from three places, in priority order: the request, the
//! `SUPPLY_ALIASES_JSON` environment variable, and the built-in tables.
//! [`AliasConfig`] captures the environment once at startup; every request
//! then merges its own hints on top through [`AliasConfig::merged`].

use std::collections::HashSet;

use serde::Deserialize;

/// Environment variable holding JSON alias overrides.
pub const SUPPLY_ALIASES_ENV: &str = "SUPPLY_ALIASES_JSON";

/// Built-in power-high (VDD-like) pin names.
pub const DEFAULT_POWER_HIGH: &[&str] = &["VDD", "VCC"];

/// Built-in power-low (ground-like) pin names.
pub const DEFAULT_POWER_LOW: &[&str] = &["VSS", "GND", "0"];

/// Built-in output pin names.
pub const DEFAULT_OUTPUTS: &[&str] = &["Y", "OUT", "Z", "Q", "QO", "QBAR", "Y0", "Y1"];

/// Partial alias hints for the three role categories.
///
/// Deserializes from either the nested form
/// `{"supplies": {"vdd": [..], "vss": [..]}, "outputs": [..]}` or the flat
/// form `{"power_high_aliases": [..], "power_low_aliases": [..],
/// "output_aliases": [..]}`. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HintsWire")]
pub struct AliasHints {
    pub power_high: Vec<String>,
    pub power_low: Vec<String>,
    pub outputs: Vec<String>,
}

impl AliasHints {
    /// The built-in alias tables.
    pub fn builtin() -> Self {
        Self {
            power_high: to_owned(DEFAULT_POWER_HIGH),
            power_low: to_owned(DEFAULT_POWER_LOW),
            outputs: to_owned(DEFAULT_OUTPUTS),
        }
    }

    /// True when no category carries any alias.
    pub fn is_empty(&self) -> bool {
        self.power_high.is_empty() && self.power_low.is_empty() && self.outputs.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HintsWire {
    supplies: Option<SuppliesWire>,
    outputs: Vec<AliasEntry>,
    power_high_aliases: Vec<AliasEntry>,
    power_low_aliases: Vec<AliasEntry>,
    output_aliases: Vec<AliasEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SuppliesWire {
    vdd: Vec<AliasEntry>,
    vss: Vec<AliasEntry>,
}

/// Alias names may be written as bare numbers (`0` for ground).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AliasEntry {
    Text(String),
    Number(serde_json::Number),
}

impl AliasEntry {
    fn into_name(self) -> String {
        match self {
            AliasEntry::Text(s) => s,
            AliasEntry::Number(n) => n.to_string(),
        }
    }
}

impl From<HintsWire> for AliasHints {
    fn from(wire: HintsWire) -> Self {
        let supplies = wire.supplies.unwrap_or_default();
        let names = |nested: Vec<AliasEntry>, flat: Vec<AliasEntry>| -> Vec<String> {
            nested
                .into_iter()
                .chain(flat)
                .map(AliasEntry::into_name)
                .collect()
        };

        Self {
            power_high: names(supplies.vdd, wire.power_high_aliases),
            power_low: names(supplies.vss, wire.power_low_aliases),
            outputs: names(wire.outputs, wire.output_aliases),
        }
    }
}

/// An ordered, case-insensitively de-duplicated alias list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSet {
    names: Vec<String>,
    folded: HashSet<String>,
}

impl AliasSet {
    /// Build a set from candidate names, keeping the first spelling of each
    /// name. Falls back to `fallback` when no candidate survives.
    pub fn merged<'a, I>(candidates: I, fallback: &[&str]) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self {
            names: Vec::new(),
            folded: HashSet::new(),
        };
        for name in candidates {
            set.push(name);
        }
        if set.names.is_empty() {
            for name in fallback {
                set.push(name);
            }
        }
        set
    }

    fn push(&mut self, name: &str) {
        if self.folded.insert(name.to_lowercase()) {
            self.names.push(name.to_string());
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.folded.contains(&name.to_lowercase())
    }

    /// Aliases in merge order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The merged alias sets for all three role categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSets {
    pub power_high: AliasSet,
    pub power_low: AliasSet,
    pub outputs: AliasSet,
}

impl AliasSets {
    /// True if `name` is a power-high or power-low alias.
    pub fn is_supply(&self, name: &str) -> bool {
        self.power_high.contains(name) || self.power_low.contains(name)
    }
}

impl Default for AliasSets {
    fn default() -> Self {
        merge(None, None, &AliasHints::builtin())
    }
}

/// Merge request, environment and default hints into one set per category.
///
/// Sources are concatenated in that order and de-duplicated
/// case-insensitively, first occurrence wins. Only a category that is empty
/// in all three sources, `defaults` included, falls back to the built-in
/// table.
pub fn merge(
    request: Option<&AliasHints>,
    env: Option<&AliasHints>,
    defaults: &AliasHints,
) -> AliasSets {
    let sources = [request, env, Some(defaults)];
    let collect = |pick: fn(&AliasHints) -> &Vec<String>| {
        sources
            .iter()
            .flatten()
            .flat_map(move |hints| pick(hints).iter().map(String::as_str))
            .collect::<Vec<_>>()
    };

    AliasSets {
        power_high: AliasSet::merged(collect(|h| &h.power_high), DEFAULT_POWER_HIGH),
        power_low: AliasSet::merged(collect(|h| &h.power_low), DEFAULT_POWER_LOW),
        outputs: AliasSet::merged(collect(|h| &h.outputs), DEFAULT_OUTPUTS),
    }
}

/// Process-wide alias configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AliasConfig {
    env: Option<AliasHints>,
    defaults: AliasHints,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AliasConfig {
    /// Create a configuration with explicit environment-level hints.
    pub fn new(env: Option<AliasHints>) -> Self {
        Self {
            env,
            defaults: AliasHints::builtin(),
        }
    }

    /// Read overrides from [`SUPPLY_ALIASES_ENV`].
    pub fn from_env() -> Self {
        let raw = std::env::var(SUPPLY_ALIASES_ENV).ok();
        Self::from_env_value(raw.as_deref())
    }

    /// Build a configuration from the raw value of the environment variable.
    ///
    /// Anything that is not a JSON object of the expected shape is ignored.
    pub fn from_env_value(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Self::new(None);
        }

        let hints = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value @ serde_json::Value::Object(_)) => {
                match serde_json::from_value::<AliasHints>(value) {
                    Ok(hints) => Some(hints),
                    Err(e) => {
                        log::warn!("ignoring {}: {}", SUPPLY_ALIASES_ENV, e);
                        None
                    }
                }
            }
            Ok(_) => {
                log::warn!("ignoring {}: expected a JSON object", SUPPLY_ALIASES_ENV);
                None
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", SUPPLY_ALIASES_ENV, e);
                None
            }
        };

        Self::new(hints)
    }

    /// Environment-level hints, if any were configured.
    pub fn env_hints(&self) -> Option<&AliasHints> {
        self.env.as_ref()
    }

    /// Merge per-request hints with this configuration.
    pub fn merged(&self, request: Option<&AliasHints>) -> AliasSets {
        merge(request, self.env.as_ref(), &self.defaults)
    }
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
