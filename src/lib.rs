//! COMTRADE Configuration Parser Library
//!
//! A Rust library for reading the configuration (CFG) half of COMTRADE
//! power-system disturbance recordings, covering the IEEE/IEC 1991, 1999,
//! 2001 and 2013 revisions.
//!
//! This library provides tools for:
//! - Parsing station identity, analog and status channel descriptors
//! - Tracking sampling-rate segments and the timestamp-critical flag
//! - Revision-aware date/time parsing with exact sub-second precision
//! - Reporting skipped lines as diagnostics instead of failing the parse
//! - Helpers that DAT decoders need to frame and scale samples

pub mod cfg_parser;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use cfg_parser::{CfgParser, Diagnostic, DiagnosticKind, ParseOutcome};
pub use config::{ParserConfig, RateSegmentPolicy};
pub use error::{ComtradeError, Result};
pub use models::{
    AnalogChannel, DatFormat, DateOrder, ParsedRecord, Revision, SampleRateSegment, StatusChannel,
};
