//! Core data structures for COMTRADE configuration records.
//!
//! Defines the revision enumeration, channel descriptors, sampling-rate
//! segments and the finished [`ParsedRecord`] handed to DAT decoders.

use crate::constants::{
    DEFAULT_REVISION_TOKEN, DEFAULT_PORS, DEFAULT_TRANSFORMER_RATIO, dat_types,
};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard revision governing field layout and date ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Revision {
    #[default]
    #[serde(rename = "1991")]
    Rev1991,
    #[serde(rename = "1999")]
    Rev1999,
    #[serde(rename = "2001")]
    Rev2001,
    #[serde(rename = "2013")]
    Rev2013,
}

/// Order of the day and month groups in a CFG date token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    MonthDayYear,
    DayMonthYear,
}

impl Revision {
    /// Revision year exactly as written in the header line
    pub fn as_str(&self) -> &'static str {
        match self {
            Revision::Rev1991 => DEFAULT_REVISION_TOKEN,
            Revision::Rev1999 => "1999",
            Revision::Rev2001 => "2001",
            Revision::Rev2013 => "2013",
        }
    }

    /// 1991 writes mm/dd/yyyy, every later revision writes dd/mm/yyyy
    pub fn date_order(&self) -> DateOrder {
        match self {
            Revision::Rev1991 => DateOrder::MonthDayYear,
            _ => DateOrder::DayMonthYear,
        }
    }

    /// Whether a time multiplier line follows the DAT file type line
    pub fn has_time_multiplier(&self) -> bool {
        !matches!(self, Revision::Rev1991)
    }

    /// Whether the time code and TMQ/leap-second trailer lines are present
    pub fn has_time_quality_trailer(&self) -> bool {
        matches!(self, Revision::Rev2013)
    }
}

impl FromStr for Revision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1991" => Ok(Revision::Rev1991),
            "1999" => Ok(Revision::Rev1999),
            "2001" => Ok(Revision::Rev2001),
            "2013" => Ok(Revision::Rev2013),
            other => Err(format!("unknown COMTRADE revision '{}'", other)),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analog channel descriptor
///
/// Raw DAT samples convert to engineering units as `a * raw + b`; `skew`
/// is the channel's time offset from the sample instant in microseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogChannel {
    pub n: usize,
    pub name: String,
    pub phase: String,
    /// Circuit component being monitored
    pub ccbm: String,
    pub uu: String,
    pub a: f64,
    pub b: f64,
    pub skew: f64,
    pub cmin: f64,
    pub cmax: f64,
    pub primary: f64,
    pub secondary: f64,
    /// `P` when `a * raw + b` yields primary values, `S` for secondary
    pub pors: String,
}

impl AnalogChannel {
    /// Create a channel with 1991 defaults for the transformer fields
    #[allow(clippy::too_many_arguments)]
    pub fn without_ratio(
        n: usize,
        name: String,
        phase: String,
        ccbm: String,
        uu: String,
        a: f64,
        b: f64,
        skew: f64,
        cmin: f64,
        cmax: f64,
    ) -> Self {
        Self {
            n,
            name,
            phase,
            ccbm,
            uu,
            a,
            b,
            skew,
            cmin,
            cmax,
            primary: DEFAULT_TRANSFORMER_RATIO,
            secondary: DEFAULT_TRANSFORMER_RATIO,
            pors: DEFAULT_PORS.to_string(),
        }
    }

    /// Convert a raw DAT sample into channel units
    pub fn scale(&self, raw: f64) -> f64 {
        self.a * raw + self.b
    }

    /// Check a raw DAT sample against the declared `cmin..=cmax` range
    pub fn in_range(&self, raw: f64) -> bool {
        (self.cmin..=self.cmax).contains(&raw)
    }

    /// Primary-to-secondary transformer ratio, if it is usable
    pub fn ratio(&self) -> Option<f64> {
        let ratio = self.primary / self.secondary;
        ratio.is_finite().then_some(ratio)
    }

    fn is_primary(&self) -> bool {
        self.pors.eq_ignore_ascii_case("P")
    }

    /// Express a scaled value in primary units
    pub fn to_primary(&self, value: f64) -> f64 {
        match self.ratio() {
            Some(ratio) if !self.is_primary() => value * ratio,
            _ => value,
        }
    }

    /// Express a scaled value in secondary units
    pub fn to_secondary(&self, value: f64) -> f64 {
        match self.ratio() {
            Some(ratio) if self.is_primary() && ratio != 0.0 => value / ratio,
            _ => value,
        }
    }
}

/// Status (digital) channel descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChannel {
    pub n: usize,
    pub name: String,
    pub phase: String,
    pub ccbm: String,
    /// Normal (default) state of the channel
    pub y: i64,
}

/// One sampling-rate segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRateSegment {
    /// Sampling rate in Hz
    pub samp: f64,
    /// Number of the last sample recorded at this rate
    pub endsamp: u64,
}

/// DAT file encodings named on the file type line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatFormat {
    Ascii,
    Binary,
    Binary32,
    Float32,
}

impl DatFormat {
    /// Match a file type token, ignoring case
    pub fn from_token(token: &str) -> Option<Self> {
        let upper = token.to_ascii_uppercase();
        match upper.as_str() {
            dat_types::ASCII => Some(DatFormat::Ascii),
            dat_types::BINARY => Some(DatFormat::Binary),
            dat_types::BINARY32 => Some(DatFormat::Binary32),
            dat_types::FLOAT32 => Some(DatFormat::Float32),
            _ => None,
        }
    }

    /// Width of one analog sample in a binary DAT record
    pub fn analog_sample_bytes(&self) -> Option<usize> {
        match self {
            DatFormat::Ascii => None,
            DatFormat::Binary => Some(2),
            DatFormat::Binary32 | DatFormat::Float32 => Some(4),
        }
    }
}

/// Finished configuration record
///
/// Built line by line by [`crate::cfg_parser::CfgParser`]. Fields that a
/// revision does not carry, or that the input never reached, stay `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub station: String,
    pub device: String,
    pub standard: Revision,

    pub total_channels: usize,
    pub analog_channel_count: usize,
    pub status_channel_count: usize,
    pub analog_channels: Vec<AnalogChannel>,
    pub status_channels: Vec<StatusChannel>,

    /// Nominal line frequency in Hz
    pub frequency: f64,

    /// Number of sampling-rate segments; a declared 0 is reported as 1
    pub nrates: usize,
    /// Set when the file declared 0 rate segments
    pub timestamp_critical: bool,
    pub sample_rates: Vec<SampleRateSegment>,

    pub start_timestamp: Option<NaiveDateTime>,
    pub event_timestamp: Option<NaiveDateTime>,

    pub dat_filetype: String,

    /// Present from revision 1999 onwards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_multiplier: Option<f64>,

    // 2013 trailer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmq_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leap_second: Option<String>,
}

impl ParsedRecord {
    /// Parse the DAT file type token, if it is one of the known encodings
    pub fn dat_format(&self) -> Option<DatFormat> {
        DatFormat::from_token(&self.dat_filetype)
    }

    /// Number of the last sample in the recording
    pub fn total_samples(&self) -> Option<u64> {
        self.sample_rates.last().map(|segment| segment.endsamp)
    }

    /// Sampling rate in effect for a 1-based sample number
    pub fn rate_for_sample(&self, sample: u64) -> Option<f64> {
        self.sample_rates
            .iter()
            .find(|segment| sample <= segment.endsamp)
            .map(|segment| segment.samp)
    }

    /// Look up an analog channel by name
    pub fn analog_channel(&self, name: &str) -> Option<&AnalogChannel> {
        self.analog_channels.iter().find(|ch| ch.name == name)
    }

    /// Look up a status channel by name
    pub fn status_channel(&self, name: &str) -> Option<&StatusChannel> {
        self.status_channels.iter().find(|ch| ch.name == name)
    }

    /// Time between the first data point and the trigger point
    pub fn recording_span(&self) -> Option<Duration> {
        match (self.start_timestamp, self.event_timestamp) {
            (Some(start), Some(event)) => Some(event - start),
            _ => None,
        }
    }

    /// Size in bytes of one binary DAT record
    ///
    /// Each record holds a 4-byte sample number, a 4-byte timestamp, one
    /// value per analog channel and one 16-bit word per 16 status channels.
    pub fn binary_record_size(&self) -> Option<usize> {
        let sample_bytes = self.dat_format()?.analog_sample_bytes()?;
        let status_words = self.status_channel_count.div_ceil(16);
        self.analog_channel_count
            .checked_mul(sample_bytes)?
            .checked_add(status_words.checked_mul(2)?)?
            .checked_add(4 + 4)
    }
}
