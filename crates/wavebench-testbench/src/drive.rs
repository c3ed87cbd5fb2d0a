//! Per-pin input stimulus.
//!
//! On the wire a drive is a JSON object tagged by `type` (or the older
//! `kind`):
//!
//! ```json
//! {"type": "pulse", "v1": 0, "v2": "1.8", "td": 1e-10}
//! {"type": "dc", "v": 0.9}
//! {"type": "none"}
//! ```
//!
//! Pulse fields left out fall back to the normalized simulation parameters
//! when the drive is resolved into a [`PinDrive`].

use std::collections::HashMap;

use serde::Deserialize;
use wavebench_core::{SimParams, format_number};

/// Drives keyed by pin name.
pub type PinDrives = HashMap<String, DriveSpec>;

/// A requested stimulus, before defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "DriveWire")]
pub enum DriveSpec {
    Pulse(PulseOverrides),
    Dc { level: f64 },
    None,
}

impl Default for DriveSpec {
    fn default() -> Self {
        DriveSpec::Pulse(PulseOverrides::default())
    }
}

/// Optional overrides for each pulse field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PulseOverrides {
    pub v1: Option<f64>,
    pub v2: Option<f64>,
    pub delay: Option<f64>,
    pub rise: Option<f64>,
    pub fall: Option<f64>,
    pub width: Option<f64>,
    pub period: Option<f64>,
}

/// A fully specified stimulus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinDrive {
    Pulse {
        v1: f64,
        v2: f64,
        delay: f64,
        rise: f64,
        fall: f64,
        width: f64,
        period: f64,
    },
    Dc {
        level: f64,
    },
    None,
}

impl DriveSpec {
    /// Fill unspecified pulse fields from the simulation parameters.
    pub fn resolve(&self, params: &SimParams) -> PinDrive {
        match *self {
            DriveSpec::Pulse(o) => PinDrive::Pulse {
                v1: o.v1.unwrap_or(0.0),
                v2: o.v2.unwrap_or(params.supply_voltage),
                delay: o.delay.unwrap_or(0.0),
                rise: o.rise.unwrap_or(params.rise_time),
                fall: o.fall.unwrap_or(params.fall_time),
                width: o.width.unwrap_or(params.pulse_width),
                period: o.period.unwrap_or(params.period),
            },
            DriveSpec::Dc { level } => PinDrive::Dc { level },
            DriveSpec::None => PinDrive::None,
        }
    }
}

impl PinDrive {
    /// The default stimulus: a full-swing pulse from 0 to VDD.
    pub fn default_pulse(params: &SimParams) -> Self {
        DriveSpec::default().resolve(params)
    }

    /// Source line driving `pin`. An undriven pin yields a comment.
    pub fn source_line(&self, pin: &str) -> String {
        match *self {
            PinDrive::Pulse {
                v1,
                v2,
                delay,
                rise,
                fall,
                width,
                period,
            } => format!(
                "VIN_{pin} {pin} 0 PULSE({} {} {} {} {} {} {})",
                format_number(v1),
                format_number(v2),
                format_number(delay),
                format_number(rise),
                format_number(fall),
                format_number(width),
                format_number(period),
            ),
            PinDrive::Dc { level } => format!("VIN_{pin} {pin} 0 {}", format_number(level)),
            PinDrive::None => format!("* VIN_{pin} {pin} 0 (none)"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DriveWire {
    #[serde(rename = "type")]
    ty: Option<String>,
    kind: Option<String>,
    v1: Option<Loose>,
    v2: Option<Loose>,
    td: Option<Loose>,
    tr: Option<Loose>,
    tf: Option<Loose>,
    pw: Option<Loose>,
    per: Option<Loose>,
    v: Option<Loose>,
    dc: Option<Loose>,
}

/// A number that may arrive as a JSON string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
}

impl Loose {
    fn value(&self, field: &str) -> Result<f64, String> {
        let v = match self {
            Loose::Number(n) => *n,
            Loose::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("drive field {field}: {s:?} is not a number"))?,
        };
        if v.is_finite() {
            Ok(v)
        } else {
            Err(format!("drive field {field}: {v} is not finite"))
        }
    }
}

fn field(value: &Option<Loose>, name: &str) -> Result<Option<f64>, String> {
    value.as_ref().map(|v| v.value(name)).transpose()
}

impl TryFrom<DriveWire> for DriveSpec {
    type Error = String;

    fn try_from(wire: DriveWire) -> Result<Self, Self::Error> {
        let tag = [&wire.ty, &wire.kind]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .map(|t| t.trim().to_ascii_lowercase())
            .unwrap_or_else(|| "pulse".to_string());

        match tag.as_str() {
            "pulse" => Ok(DriveSpec::Pulse(PulseOverrides {
                v1: field(&wire.v1, "v1")?,
                v2: field(&wire.v2, "v2")?,
                delay: field(&wire.td, "td")?,
                rise: field(&wire.tr, "tr")?,
                fall: field(&wire.tf, "tf")?,
                width: field(&wire.pw, "pw")?,
                period: field(&wire.per, "per")?,
            })),
            "dc" | "const" => {
                let level = match field(&wire.v, "v")? {
                    Some(v) => v,
                    None => field(&wire.dc, "dc")?.unwrap_or(0.0),
                };
                Ok(DriveSpec::Dc { level })
            }
            "none" | "off" | "z" => Ok(DriveSpec::None),
            other => Err(format!("unknown drive type {other:?}")),
        }
    }
}
