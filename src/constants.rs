//! Application constants for the COMTRADE configuration parser
//!
//! This module contains the revision tokens, record arities, empty-field
//! defaults and DAT file type names used throughout the parser.

// =============================================================================
// Revision Tokens
// =============================================================================

/// Revision assumed when the header line carries no revision year
pub const DEFAULT_REVISION_TOKEN: &str = "1991";

/// Revision year tokens accepted on the header line
pub const REVISION_TOKENS: &[&str] = &["1991", "1999", "2001", "2013"];

// =============================================================================
// Line Layout
// =============================================================================

/// Index of the station/device/revision header line
pub const HEADER_LINE: usize = 0;

/// Index of the channel count line
pub const CHANNEL_COUNT_LINE: usize = 1;

/// Index of the first channel line (analog channels come first)
pub const FIRST_CHANNEL_LINE: usize = 2;

/// Suffix marking the analog channel count on the channel count line
pub const ANALOG_SUFFIX: &str = "A";

/// Suffix marking the status channel count on the channel count line
pub const STATUS_SUFFIX: &str = "D";

// =============================================================================
// Record Arity
// =============================================================================

/// Record arities (number of comma-separated fields) per line shape
pub mod arity {
    /// Header without a revision year (1991 files)
    pub const HEADER_SHORT: usize = 2;

    /// Header with a revision year
    pub const HEADER_FULL: usize = 3;

    /// Channel count triple: total, analog, status
    pub const CHANNEL_COUNTS: usize = 3;

    /// Analog channel line for 1999 and later
    pub const ANALOG_CHANNEL: usize = 13;

    /// Analog channel line in 1991 files (no primary, secondary or pors)
    pub const ANALOG_CHANNEL_1991: usize = 10;

    /// Status channel line for 1999 and later
    pub const STATUS_CHANNEL: usize = 5;

    /// Status channel line in 1991 files (index, name, normal state)
    pub const STATUS_CHANNEL_1991: usize = 3;

    /// Single value lines: frequency, nrates, file type, time multiplier
    pub const SINGLE: usize = 1;

    /// Pair lines: rate segment, timestamps, time code, TMQ code
    pub const PAIR: usize = 2;
}

// =============================================================================
// Empty Field Defaults
// =============================================================================

/// Field keys that may legally be empty in a CFG file
pub mod fields {
    pub const TOTAL_CHANNELS: &str = "total_channels";
    pub const ANALOG_COUNT: &str = "analog_count";
    pub const STATUS_COUNT: &str = "status_count";
    pub const TIME_MULTIPLIER: &str = "time_multiplier";
}

/// Substitutions applied to empty fields before strict parsing.
///
/// Any field not listed here must be non-empty wherever it is parsed as a
/// number or date.
pub const EMPTY_FIELD_DEFAULTS: &[(&str, &str)] = &[
    (fields::TOTAL_CHANNELS, "0"),
    (fields::ANALOG_COUNT, "0A"),
    (fields::STATUS_COUNT, "0D"),
    (fields::TIME_MULTIPLIER, "1.0"),
];

// =============================================================================
// Channel Defaults
// =============================================================================

/// Transformer ratio used when a 1991 analog line omits primary/secondary
pub const DEFAULT_TRANSFORMER_RATIO: f64 = 1.0;

/// Primary-or-secondary flag used when a 1991 analog line omits it
pub const DEFAULT_PORS: &str = "S";

// =============================================================================
// Date/Time Grammar
// =============================================================================

/// Digit count bounds for each date group (`D{1,2}/D{1,2}/D{2,4}`)
pub const DATE_GROUP_DIGITS: [(usize, usize); 3] = [(1, 2), (1, 2), (2, 4)];

/// Digit count bounds for each time group (`D{1,2}:D{2}:D{1,2}`)
pub const TIME_GROUP_DIGITS: [(usize, usize); 3] = [(1, 2), (2, 2), (1, 2)];

/// Digit count bounds for the optional fractional-second group
pub const FRACTION_DIGITS: (usize, usize) = (1, 12);

/// Sub-second digits represented natively (nanoseconds)
pub const NANOSECOND_DIGITS: usize = 9;

// =============================================================================
// DAT File Types
// =============================================================================

/// DAT file type tokens recognised by [`crate::models::DatFormat`]
pub mod dat_types {
    pub const ASCII: &str = "ASCII";
    pub const BINARY: &str = "BINARY";
    pub const BINARY32: &str = "BINARY32";
    pub const FLOAT32: &str = "FLOAT32";
}

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither `RUST_LOG` nor a verbosity flag is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";
