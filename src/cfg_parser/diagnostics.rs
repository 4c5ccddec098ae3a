//! Diagnostics and result structures for CFG parsing
//!
//! Lines that match no known record shape do not stop the parse. They are
//! collected here and returned next to the finished record.

use crate::models::ParsedRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a line was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Line position or field count matched no record shape
    UnrecognizedLine,
    /// Header line carried a revision year outside 1991/1999/2001/2013
    UnrecognizedRevision,
}

/// A skipped line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 0-based line index
    pub line: usize,
    /// Line content without its line terminator
    pub content: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            DiagnosticKind::UnrecognizedLine => "unrecognized line",
            DiagnosticKind::UnrecognizedRevision => "unrecognized revision",
        };
        write!(f, "line {}: {}: '{}'", self.line, label, self.content)
    }
}

/// Parsing result with the finished record and skipped-line diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub record: ParsedRecord,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    /// True when every line matched a record shape
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Drop the diagnostics and keep the record
    pub fn into_record(self) -> ParsedRecord {
        self.record
    }
}
