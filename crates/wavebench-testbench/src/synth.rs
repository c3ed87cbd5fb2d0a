//! Testbench synthesis.
//!
//! The generated document embeds the uploaded netlist (with its `.subckt`
//! headers normalized), ties the supplies, drives every input, loads every
//! output, instantiates the subcircuit as `XU1` and ends with a control
//! block that runs a transient analysis and dumps the plotted nodes with
//! `wrdata`.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use wavebench_core::{AliasSets, SimParams, format_number};
use wavebench_parser::{infer, rewrite};

use crate::drive::{PinDrive, PinDrives};

/// Pin names never driven or loaded, whatever the role assignment says.
const RESERVED_SUPPLIES: [&str; 4] = ["VDD", "VSS", "0", "GND"];

/// Caller-supplied role assignment.
///
/// Missing lists are empty. On the wire a singular `output` is accepted
/// when `outputs` is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RolesWire")]
pub struct RolesOverride {
    pub vdd: Option<String>,
    pub vss: Option<String>,
    pub outputs: Vec<String>,
    pub inputs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RolesWire {
    vdd: Option<String>,
    vss: Option<String>,
    outputs: Option<Vec<String>>,
    output: Option<String>,
    inputs: Option<Vec<String>>,
}

impl From<RolesWire> for RolesOverride {
    fn from(wire: RolesWire) -> Self {
        Self {
            vdd: wire.vdd,
            vss: wire.vss,
            outputs: wire
                .outputs
                .or_else(|| wire.output.map(|o| vec![o]))
                .unwrap_or_default(),
            inputs: wire.inputs.unwrap_or_default(),
        }
    }
}

/// Everything needed to generate one testbench.
#[derive(Debug, Clone, Copy)]
pub struct Testbench<'a> {
    /// The uploaded netlist text.
    pub netlist: &'a str,
    /// Subcircuit to instantiate.
    pub subckt_name: &'a str,
    /// Pins in instantiation order.
    pub pin_order: &'a [String],
    pub params: &'a SimParams,
    /// Nodes to save and dump, in output column order.
    pub plot_pins: &'a [String],
    /// Where the simulator writes its results.
    pub results_path: &'a Path,
    /// Explicit roles; inferred from `pin_order` when absent.
    pub roles: Option<&'a RolesOverride>,
    pub pin_drives: Option<&'a PinDrives>,
    pub aliases: &'a AliasSets,
}

/// Supplies, inputs and outputs after overrides and safety filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedRoles<'a> {
    vdd: String,
    vss: String,
    inputs: Vec<String>,
    outputs: Vec<String>,
    /// Set for inferred roles: every alias-matched pin counts as a supply.
    supply_aliases: Option<&'a AliasSets>,
}

impl<'a> ResolvedRoles<'a> {
    fn new(tb: &Testbench<'a>) -> Self {
        let (vdd, vss, inputs, outputs, supply_aliases) = match tb.roles {
            Some(r) => (
                r.vdd.clone().unwrap_or_else(|| "VDD".to_string()),
                r.vss.clone().unwrap_or_else(|| "0".to_string()),
                r.inputs.clone(),
                r.outputs.clone(),
                None,
            ),
            None => {
                let inferred = infer(tb.pin_order, tb.aliases);
                (
                    inferred.power_high,
                    inferred.power_low,
                    inferred.inputs,
                    inferred.outputs,
                    Some(tb.aliases),
                )
            }
        };

        let mut roles = Self {
            vdd,
            vss,
            inputs: Vec::new(),
            outputs: Vec::new(),
            supply_aliases,
        };
        roles.inputs = inputs.into_iter().filter(|p| !roles.is_supply(p)).collect();
        roles.outputs = outputs.into_iter().filter(|p| !roles.is_supply(p)).collect();
        roles
    }

    fn is_supply(&self, pin: &str) -> bool {
        pin == self.vdd
            || pin == self.vss
            || RESERVED_SUPPLIES.contains(&pin)
            || self.supply_aliases.is_some_and(|a| a.is_supply(pin))
    }
}

/// Generate the simulator input document. Never fails.
pub fn synthesize(tb: &Testbench<'_>) -> String {
    let params = tb.params;
    let netlist = rewrite(tb.netlist, tb.aliases);
    let roles = ResolvedRoles::new(tb);
    log::debug!(
        "testbench for {}: vdd={} vss={} inputs={:?} outputs={:?}",
        tb.subckt_name,
        roles.vdd,
        roles.vss,
        roles.inputs,
        roles.outputs
    );

    let mut sources = vec![
        format!("VDD_SRC {} 0 {}", roles.vdd, format_number(params.supply_voltage)),
        format!("VSS_SRC {} 0 0", roles.vss),
    ];
    for pin in &roles.inputs {
        let drive = tb
            .pin_drives
            .and_then(|drives| drives.get(pin))
            .map_or_else(|| PinDrive::default_pulse(params), |d| d.resolve(params));
        sources.push(drive.source_line(pin));
    }

    let cload = format_number(params.load_capacitance);
    let load_pins: Vec<&str> = if roles.outputs.is_empty() {
        tb.pin_order
            .iter()
            .map(String::as_str)
            .find(|p| !roles.is_supply(p))
            .into_iter()
            .collect()
    } else {
        roles.outputs.iter().map(String::as_str).collect()
    };
    let loads: Vec<String> = load_pins
        .iter()
        .map(|p| format!("CLOAD_{p} {p} 0 {cload}"))
        .collect();

    let vectors = save_vectors(tb.plot_pins);
    let results = tb.results_path.display();

    let mut lines = vec![
        "* === Uploaded Netlist ===".to_string(),
        netlist,
        String::new(),
        "* === Auto-generated Testbench ===".to_string(),
        ".options method=trap reltol=1e-3 maxord=2".to_string(),
        format!(".temp {}", format_number(params.temperature)),
        String::new(),
        "* Sources".to_string(),
    ];
    lines.extend(sources);
    lines.extend([
        String::new(),
        "* DUT".to_string(),
        format!("XU1 {} {}", tb.pin_order.join(" "), tb.subckt_name),
        String::new(),
        "* Loads".to_string(),
    ]);
    if loads.is_empty() {
        lines.push("* (no extra loads)".to_string());
    } else {
        lines.extend(loads);
    }
    lines.extend([
        String::new(),
        format!(
            ".tran {} {}",
            format_number(params.time_step),
            format_number(params.stop_time)
        ),
        format!(".save time {vectors}"),
        String::new(),
        ".control".to_string(),
        "  set noaskquit".to_string(),
        "  set nomoremode".to_string(),
        "  set wr_singlescale".to_string(),
        "  set filetype=ascii".to_string(),
        "  run".to_string(),
        format!("  wrdata {results} time {vectors}"),
        ".endc".to_string(),
        String::new(),
        String::new(),
        ".end".to_string(),
    ]);

    lines.join("\n")
}

/// Result column labels for the given plot pins: `v(<pin>)`, de-duplicated.
pub fn plot_labels(plot_pins: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    plot_pins
        .iter()
        .filter(|p| seen.insert(p.as_str()))
        .map(|p| format!("v({p})"))
        .collect()
}

fn save_vectors(plot_pins: &[String]) -> String {
    plot_labels(plot_pins).join(" ")
}
