//! Error types for wavebench-testbench.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request is missing a netlist, a subcircuit name or its pins.
    #[error("invalid request: {0}")]
    InvalidRequestShape(String),
}

pub type Result<T> = std::result::Result<T, Error>;
