//! Shared configuration and value types for wavebench.
//!
//! This crate provides:
//! - Role alias tables and their request/environment/default merge
//! - Simulation parameter normalization
//! - Number formatting for generated simulator input

pub mod aliases;
pub mod params;
pub mod units;

pub use aliases::{AliasConfig, AliasHints, AliasSet, AliasSets, SUPPLY_ALIASES_ENV, merge};
pub use params::{Quantity, RawParams, SimParams};
pub use units::{format_number, format_numbers};
