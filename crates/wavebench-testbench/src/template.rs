//! Placeholder-based testbench templates.
//!
//! A template embeds an uploaded netlist above a testbench block whose
//! values are `{NAME}` placeholders, filled in later by [`render_template`].
//! This is the older two-step flow; [`crate::synthesize`] builds a complete
//! testbench in one pass.

use std::path::Path;

use serde::Deserialize;
use wavebench_core::{SimParams, format_number};

const BANNER: &str = "* === Uploaded Netlist (auto) ===";

const BLOCK: &str = "\
* === Auto Testbench Template (placeholders kept) ===
.param VDD={VDD}
.param TR={TR}
.param TF={TF}
.param PW={PW}
.param PER={PER}
.param CLOAD={CLOAD}
.temp {TEMP}

* Supplies
VDD_SRC VDD 0 {VDD}
VSS_SRC 0   0 0

* Drive
VIN   {A_NODE} 0 PULSE(0 {VDD} 0 {TR} {TF} {PW} {PER})

* XU1 DUT: subckt + pins are placeholders (filled at render time)
XU1   {PIN_LIST} {SUBCKT_NAME}

Cload {Y_NODE} 0 {CLOAD}

.options method=trap reltol=1e-3 maxord=2
.tran {TSTEP} {TSTOP}
.save time {SAVE_VECTORS}

.control
  set noaskquit
  set nomoremode
  set wr_singlescale
  set filetype=ascii
  run
  wrdata {OUT_CSV} time {SAVE_VECTORS}
.endc

.end
";

/// Subcircuit used when the render variables name none.
pub const DEFAULT_SUBCKT: &str = "NOT1";

/// Optional overrides applied when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateVars {
    #[serde(rename = "SUBCKT_NAME")]
    pub subckt_name: Option<String>,
    #[serde(rename = "PIN_LIST")]
    pub pin_list: Option<PinList>,
}

/// A pin list given either as separate names or as one string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PinList {
    Names(Vec<String>),
    Text(String),
}

impl PinList {
    /// The space-separated form, or `None` for a blank string.
    fn joined(&self) -> Option<String> {
        match self {
            PinList::Names(names) => Some(names.join(" ")),
            PinList::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
        }
    }
}

/// Embed a netlist in a placeholder testbench template.
pub fn template_from_netlist(netlist: &str) -> String {
    format!("{BANNER}\n{}\n\n{BLOCK}", netlist.trim())
}

/// Fill every placeholder of a template.
///
/// `nodes[0]` is the driven node and `nodes[1]` the loaded one (defaults
/// `A` and `Y`); both are saved. Without overrides the instance is
/// `XU1 <y> <a> VDD 0 NOT1`.
pub fn render_template(
    template: &str,
    params: &SimParams,
    nodes: &[String],
    results_path: &Path,
    vars: Option<&TemplateVars>,
) -> String {
    let a_node = nodes.first().map_or("A", String::as_str);
    let y_node = nodes.get(1).map_or("Y", String::as_str);

    let mut subckt_name = DEFAULT_SUBCKT.to_string();
    let mut pin_list = format!("{y_node} {a_node} VDD 0");
    if let Some(vars) = vars {
        if let Some(name) = &vars.subckt_name {
            subckt_name.clone_from(name);
        }
        if let Some(pins) = vars.pin_list.as_ref().and_then(PinList::joined) {
            pin_list = pins;
        }
    }

    let save_vectors = format!("v({a_node}) v({y_node})");
    let results = results_path.display().to_string();
    let substitutions = [
        ("{VDD}", format_number(params.supply_voltage)),
        ("{TR}", format_number(params.rise_time)),
        ("{TF}", format_number(params.fall_time)),
        ("{PW}", format_number(params.pulse_width)),
        ("{PER}", format_number(params.period)),
        ("{CLOAD}", format_number(params.load_capacitance)),
        ("{TSTEP}", format_number(params.time_step)),
        ("{TSTOP}", format_number(params.stop_time)),
        ("{TEMP}", format_number(params.temperature)),
        ("{A_NODE}", a_node.to_string()),
        ("{Y_NODE}", y_node.to_string()),
        ("{SAVE_VECTORS}", save_vectors),
        ("{OUT_CSV}", results),
        ("{SUBCKT_NAME}", subckt_name),
        ("{PIN_LIST}", pin_list),
    ];

    substitutions
        .iter()
        .fold(template.to_string(), |text, (key, value)| text.replace(key, value))
}
