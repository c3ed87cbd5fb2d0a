//! Pin role inference from alias tables.

use std::collections::HashSet;

use serde::Serialize;
use wavebench_core::AliasSets;

/// Power-high node used when no pin matches the power-high aliases.
pub const FALLBACK_POWER_HIGH: &str = "VDD";
/// Power-low node used when no pin matches the power-low aliases.
pub const FALLBACK_POWER_LOW: &str = "0";
/// Output name used for an empty pin list.
pub const FALLBACK_OUTPUT: &str = "Y";

/// Role assignment for the pins of one subcircuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roles {
    pub power_high: String,
    pub power_low: String,
    pub outputs: Vec<String>,
    pub inputs: Vec<String>,
}

impl Roles {
    /// The single inferred output.
    pub fn output(&self) -> Option<&str> {
        self.outputs.first().map(String::as_str)
    }

    pub fn is_supply(&self, pin: &str) -> bool {
        pin == self.power_high || pin == self.power_low
    }
}

/// Infer roles for an ordered pin list.
///
/// Matching against the alias sets is case-insensitive. No supply-aliased
/// pin is ever an input, and resolved supplies are never outputs. A pin list
/// made only of supplies has no output.
pub fn infer<S: AsRef<str>>(pins: &[S], aliases: &AliasSets) -> Roles {
    let pins: Vec<&str> = pins.iter().map(|p| p.as_ref()).collect();

    let power_high = pins
        .iter()
        .copied()
        .find(|p| aliases.power_high.contains(p));
    let power_low = pins
        .iter()
        .copied()
        .find(|p| Some(*p) != power_high && aliases.power_low.contains(p));
    let resolved = |p: &str| Some(p) == power_high || Some(p) == power_low;

    let output = pins
        .iter()
        .copied()
        .find(|p| aliases.outputs.contains(p) && !resolved(*p))
        .or_else(|| pins.iter().copied().find(|p| !aliases.is_supply(p)))
        .or(pins.is_empty().then_some(FALLBACK_OUTPUT));

    let mut seen = HashSet::new();
    let inputs = pins
        .iter()
        .copied()
        .filter(|p| Some(*p) != output && !aliases.is_supply(p) && seen.insert(*p))
        .map(str::to_string)
        .collect();

    Roles {
        power_high: power_high.unwrap_or(FALLBACK_POWER_HIGH).to_string(),
        power_low: power_low.unwrap_or(FALLBACK_POWER_LOW).to_string(),
        outputs: output.map(str::to_string).into_iter().collect(),
        inputs,
    }
}
