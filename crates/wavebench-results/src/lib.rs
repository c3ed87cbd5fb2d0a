//! Waveform extraction from simulator output.
//!
//! This crate provides:
//! - Extraction of labelled waveforms from headerless `wrdata` output
//! - A header-aware extractor for template testbenches
//! - Linear interpolation over extracted waveforms
//! - Warning scraping from simulator logs
//!
//! # Example
//!
//! ```
//! use wavebench_results::extract;
//!
//! let doc = "0 0.0 0.0 1.2\n1 1e-9 1.2 0.0\n";
//! let waves = extract(doc, &["v(a)", "v(y)"]).unwrap();
//!
//! assert_eq!(waves.time, [0.0, 1e-9]);
//! assert_eq!(waves.value_at("v(a)", 0.5e-9), Some(0.6));
//! ```

pub mod error;
pub mod legacy;
pub mod types;
pub mod warnings;
pub mod wrdata;

pub use error::{Error, Result};
pub use legacy::{LEGACY_LABELS, extract_legacy, extract_named};
pub use types::Waveform;
pub use warnings::tail_warnings;
pub use wrdata::{extract, read_wrdata};
