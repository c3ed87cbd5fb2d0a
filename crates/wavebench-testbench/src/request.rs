//! Simulation requests as received from a client.

use std::path::Path;

use serde::Deserialize;
use wavebench_core::{AliasConfig, AliasHints, RawParams, SimParams};

use crate::drive::PinDrives;
use crate::error::{Error, Result};
use crate::synth::{RolesOverride, Testbench, plot_labels, synthesize};

/// Number of leading pins plotted when the request names none.
const DEFAULT_PLOT_PINS: usize = 2;

/// Subcircuit selection: name and pin order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubcktRef {
    pub name: Option<String>,
    pub pins: Option<Vec<String>>,
}

/// A request to build a testbench for one subcircuit.
///
/// ```json
/// {
///   "netlist": ".subckt INV A Y VDD VSS ...",
///   "subckt": {"name": "INV", "pins": ["A", "Y", "VDD", "VSS"]},
///   "plot_nodes": ["A", "Y"],
///   "params": {"VDD": 1.8, "TSTOP": "5e-9"},
///   "roles": {"vdd": "VDD", "vss": "VSS", "output": "Y", "inputs": ["A"]},
///   "pin_drives": {"A": {"type": "pulse", "td": 1e-10}},
///   "hints": {"supplies": {"vdd": ["VPWR"]}}
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimulationRequest {
    pub netlist: String,
    pub subckt: Option<SubcktRef>,
    #[serde(alias = "plot_pins")]
    pub plot_nodes: Option<Vec<String>>,
    pub params: Option<RawParams>,
    pub roles: Option<RolesOverride>,
    pub pin_drives: Option<PinDrives>,
    pub hints: Option<AliasHints>,
}

/// A generated testbench and the labels of its result columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTestbench {
    pub document: String,
    pub params: SimParams,
    pub plot_pins: Vec<String>,
    /// `v(<pin>)` for each plotted pin, in result column order.
    pub labels: Vec<String>,
}

impl SimulationRequest {
    /// Check the request shape; returns the subcircuit name and pin order.
    pub fn validate(&self) -> Result<(&str, &[String])> {
        if self.netlist.trim().is_empty() {
            return Err(Error::InvalidRequestShape("empty netlist".into()));
        }
        let subckt = self.subckt.as_ref();
        let name = subckt
            .and_then(|s| s.name.as_deref())
            .filter(|n| !n.is_empty());
        let pins = subckt
            .and_then(|s| s.pins.as_deref())
            .filter(|p| !p.is_empty());
        match (name, pins) {
            (Some(name), Some(pins)) => Ok((name, pins)),
            _ => Err(Error::InvalidRequestShape(
                "subckt name/pins required".into(),
            )),
        }
    }

    /// Pins to plot: as requested, else the first two pins.
    pub fn plot_pins(&self) -> Vec<String> {
        match self.plot_nodes.as_deref() {
            Some(nodes) if !nodes.is_empty() => nodes.to_vec(),
            _ => self
                .subckt
                .as_ref()
                .and_then(|s| s.pins.as_deref())
                .unwrap_or_default()
                .iter()
                .take(DEFAULT_PLOT_PINS)
                .cloned()
                .collect(),
        }
    }

    /// Result column labels for [`Self::plot_pins`].
    pub fn labels(&self) -> Vec<String> {
        plot_labels(&self.plot_pins())
    }

    /// Validate the request and generate its testbench.
    pub fn prepare(&self, config: &AliasConfig, results_path: &Path) -> Result<PreparedTestbench> {
        let (name, pins) = self.validate()?;
        let params = SimParams::normalize(&self.params.clone().unwrap_or_default());
        let aliases = config.merged(self.hints.as_ref());
        let plot_pins = self.plot_pins();

        let document = synthesize(&Testbench {
            netlist: &self.netlist,
            subckt_name: name,
            pin_order: pins,
            params: &params,
            plot_pins: &plot_pins,
            results_path,
            roles: self.roles.as_ref(),
            pin_drives: self.pin_drives.as_ref(),
            aliases: &aliases,
        });
        log::info!(
            "prepared testbench for {} ({} pins, plotting {:?})",
            name,
            pins.len(),
            plot_pins
        );

        Ok(PreparedTestbench {
            document,
            params,
            labels: plot_labels(&plot_pins),
            plot_pins,
        })
    }
}
