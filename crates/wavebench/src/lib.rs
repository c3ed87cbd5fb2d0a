//! # Wavebench
//!
//! Turn an uploaded SPICE netlist into a ready-to-run transient testbench,
//! and turn the simulator's `wrdata` output back into waveforms.
//!
//! Wavebench provides:
//! - `.subckt` header scanning with pin/parameter separation
//! - Header rewriting into an explicit `PARAMS:` form
//! - Supply, input and output role inference from alias tables
//! - Simulation parameter normalization
//! - Testbench synthesis with per-pin drives and output loads
//! - Waveform extraction and simulator log warning scraping
//!
//! Running the simulator itself is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::path::Path;
//!
//! use wavebench::prelude::*;
//!
//! let netlist = ".subckt INV A Y VDD VSS\nMP Y A VDD VDD p\nMN Y A VSS VSS n\n.ends\n";
//! let aliases = AliasSets::default();
//!
//! let inv = &scan(netlist, &aliases)[0];
//! let roles = infer(&inv.pins, &aliases);
//! assert_eq!(roles.inputs, ["A"]);
//!
//! let plot = vec!["A".to_string(), "Y".to_string()];
//! let deck = synthesize(&Testbench {
//!     netlist,
//!     subckt_name: &inv.name,
//!     pin_order: &inv.pins,
//!     params: &SimParams::default(),
//!     plot_pins: &plot,
//!     results_path: Path::new("sim.txt"),
//!     roles: None,
//!     pin_drives: None,
//!     aliases: &aliases,
//! });
//! assert!(deck.ends_with(".end"));
//!
//! // After the simulator has run:
//! let waves = extract("0.0 0.0 1.2\n1e-9 1.2 0.0\n", &plot_labels(&plot)).unwrap();
//! assert_eq!(waves.points(), 2);
//! ```

// Re-export member crates
pub use wavebench_core as core;
pub use wavebench_parser as parser;
pub use wavebench_results as results;
pub use wavebench_testbench as testbench;

// ============================================================================
// Convenient re-exports from wavebench_core
// ============================================================================

pub use wavebench_core::{
    // Alias registry
    AliasConfig,
    AliasHints,
    AliasSet,
    AliasSets,
    // Parameters
    Quantity,
    RawParams,
    SUPPLY_ALIASES_ENV,
    SimParams,
    // Formatting
    format_number,
    merge,
};

// ============================================================================
// Convenient re-exports from wavebench_parser
// ============================================================================

pub use wavebench_parser::{
    // Errors
    Error as ParseError,
    Roles,
    // Scanner
    SubcktDefinition,
    SubcktSummary,
    analyze,
    // Role inference
    infer,
    // Rewriter
    rewrite,
    scan,
    split_header,
};

// ============================================================================
// Convenient re-exports from wavebench_testbench
// ============================================================================

pub use wavebench_testbench::{
    DriveSpec,
    // Errors
    Error as TestbenchError,
    PinDrive,
    PinDrives,
    PreparedTestbench,
    RolesOverride,
    // Requests
    SimulationRequest,
    TemplateVars,
    // Synthesis
    Testbench,
    plot_labels,
    render_template,
    synthesize,
    // Template flow
    template_from_netlist,
};

// ============================================================================
// Convenient re-exports from wavebench_results
// ============================================================================

pub use wavebench_results::{
    // Errors
    Error as ResultsError,
    Waveform,
    // Extraction
    extract,
    extract_legacy,
    extract_named,
    read_wrdata,
    // Logs
    tail_warnings,
};

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module containing commonly used types and functions.
///
/// ```rust
/// use wavebench::prelude::*;
/// ```
pub mod prelude {
    // Configuration and parameters
    pub use crate::{AliasConfig, AliasHints, AliasSets, SimParams};

    // Scanning and roles
    pub use crate::{Roles, SubcktDefinition, analyze, infer, scan};

    // Synthesis
    pub use crate::{SimulationRequest, Testbench, plot_labels, synthesize};

    // Extraction
    pub use crate::{Waveform, extract, read_wrdata, tail_warnings};
}
