//! COMTRADE configuration (CFG) parser
//!
//! This module turns the text half of a COMTRADE recording into a
//! [`ParsedRecord`](crate::models::ParsedRecord). The grammar is
//! context-sensitive: which record shape a line holds depends on counts read
//! on earlier lines, so the parser derives line boundaries as it goes.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - The line fold and file/stream handling
//! - [`locator`] - Derived line boundaries and per-line shape dispatch
//! - [`record_parser`] - Per-shape field extraction
//! - [`field_parsers`] - Strict numeric parsing and empty-field defaults
//! - [`datetime`] - Revision-aware date and time parsing
//! - [`diagnostics`] - Skipped-line diagnostics and the parse result
//!
//! ## Usage
//!
//! ```rust
//! use comtrade_cfg::cfg_parser::CfgParser;
//!
//! # fn example() -> comtrade_cfg::Result<()> {
//! let cfg = "Substation,Relay 7,1999\n0,0A,0D\n60\n1\n1200,2400\n\
//!            01/02/2003,10:00:00.000000\n01/02/2003,10:00:00.500000\nBINARY\n1\n";
//! let outcome = CfgParser::default().parse_str(cfg)?;
//!
//! assert_eq!(outcome.record.station, "Substation");
//! assert_eq!(outcome.record.sample_rates.len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod datetime;
pub mod diagnostics;
pub mod field_parsers;
pub mod locator;
pub mod parser;
pub mod record_parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use diagnostics::{Diagnostic, DiagnosticKind, ParseOutcome};
pub use locator::{LineKind, SchemaLocator};
pub use parser::CfgParser;
