//! Testbench generation for wavebench.
//!
//! Given an uploaded netlist and the subcircuit to exercise, this crate
//! produces a complete simulator input deck: supply ties, one stimulus per
//! input pin, capacitive loads on the outputs, the `XU1` instance and a
//! control block that dumps the plotted nodes with `wrdata`.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//!
//! use wavebench_core::{AliasSets, SimParams};
//! use wavebench_testbench::{Testbench, synthesize};
//!
//! let pins: Vec<String> = ["A", "Y", "VDD", "VSS"].map(String::from).to_vec();
//! let plot: Vec<String> = ["A", "Y"].map(String::from).to_vec();
//! let deck = synthesize(&Testbench {
//!     netlist: ".subckt INV A Y VDD VSS\n.ends",
//!     subckt_name: "INV",
//!     pin_order: &pins,
//!     params: &SimParams::default(),
//!     plot_pins: &plot,
//!     results_path: Path::new("/tmp/run/sim.txt"),
//!     roles: None,
//!     pin_drives: None,
//!     aliases: &AliasSets::default(),
//! });
//!
//! assert!(deck.contains("XU1 A Y VDD VSS INV"));
//! assert!(deck.contains("wrdata /tmp/run/sim.txt time v(A) v(Y)"));
//! ```

pub mod drive;
pub mod error;
pub mod request;
pub mod synth;
pub mod template;

pub use drive::{DriveSpec, PinDrive, PinDrives, PulseOverrides};
pub use error::{Error, Result};
pub use request::{PreparedTestbench, SimulationRequest, SubcktRef};
pub use synth::{RolesOverride, Testbench, plot_labels, synthesize};
pub use template::{PinList, TemplateVars, render_template, template_from_netlist};
