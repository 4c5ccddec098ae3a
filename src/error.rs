//! Error handling for COMTRADE configuration parsing.
//!
//! Fatal errors carry the 0-based index and raw content of the offending
//! line so callers can point at the exact place in the CFG file.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComtradeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record on line {line} ('{content}'): {reason}")]
    MalformedRecord {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Invalid date/time on line {line} ('{content}'): {reason}")]
    InvalidDateTime {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Unknown revision '{token}' on line {line}")]
    UnknownRevision { line: usize, token: String },

    #[error(
        "Channel total mismatch on line {line}: declared {total}, found {analog} analog + {status} status"
    )]
    ChannelTotalMismatch {
        line: usize,
        total: usize,
        analog: usize,
        status: usize,
    },

    #[error("Incomplete configuration: expected at least {expected_lines} lines, found {found_lines}")]
    IncompleteRecord {
        expected_lines: usize,
        found_lines: usize,
    },

    #[error("Line layout '{layout}' was already fixed before line {line}")]
    LayoutAlreadyFixed { line: usize, layout: &'static str },
}

impl ComtradeError {
    /// Create a malformed record error for a given line
    pub fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an invalid date/time error for a given line
    pub fn invalid_datetime(line: usize, content: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDateTime {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }

    /// Line index the error was raised on, if it is tied to one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { line, .. }
            | Self::InvalidDateTime { line, .. }
            | Self::UnknownRevision { line, .. }
            | Self::ChannelTotalMismatch { line, .. }
            | Self::LayoutAlreadyFixed { line, .. } => Some(*line),
            Self::Io(_) | Self::IncompleteRecord { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ComtradeError>;
