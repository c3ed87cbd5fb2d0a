//! Subcircuit header scanning for wavebench.
//!
//! This crate finds `.subckt` headers in a netlist, separates connection
//! pins from sizing parameters, rewrites headers into an explicit `PARAMS:`
//! form and infers which pins are supplies, inputs and outputs.
//!
//! # Example
//!
//! ```
//! use wavebench_core::AliasSets;
//! use wavebench_parser::{infer, scan};
//!
//! let aliases = AliasSets::default();
//! let defs = scan(".subckt NAND2 Y A B VDD VSS WP WN\n.ends\n", &aliases);
//!
//! assert_eq!(defs[0].pins, ["Y", "A", "B", "VDD", "VSS"]);
//! assert_eq!(defs[0].params, ["WP", "WN"]);
//!
//! let roles = infer(&defs[0].pins, &aliases);
//! assert_eq!(roles.outputs, ["Y"]);
//! assert_eq!(roles.inputs, ["A", "B"]);
//! ```

pub mod error;
pub mod lexer;
pub mod rewrite;
pub mod roles;
pub mod scanner;

pub use error::{Error, Result};
pub use lexer::Token;
pub use rewrite::{PARAM_DEFAULTS, param_default, rewrite};
pub use roles::{Roles, infer};
pub use scanner::{HeaderSplit, SubcktDefinition, SubcktSummary, analyze, classify, scan, split_header};
