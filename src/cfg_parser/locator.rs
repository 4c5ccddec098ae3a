//! Line layout tracking for CFG files.
//!
//! The record shape expected on a line depends on counts read from earlier
//! lines. The channel count line fixes the channel ranges, the frequency
//! line and the rate-count line; the rate-count line then fixes the rate
//! segment range and every timestamp and trailer line after it. Each layout
//! is stored in a [`OnceCell`] so it can be derived exactly once.

use crate::constants::{CHANNEL_COUNT_LINE, FIRST_CHANNEL_LINE, HEADER_LINE};
use crate::error::{ComtradeError, Result};
use crate::models::Revision;
use std::cell::OnceCell;
use tracing::debug;

/// Record shape expected on a given line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    ChannelCounts,
    AnalogChannel,
    StatusChannel,
    Frequency,
    RateCount,
    RateSegment,
    StartTimestamp,
    EventTimestamp,
    DatFileType,
    TimeMultiplier,
    TimeCode,
    TmqCode,
    Unknown,
}

/// A run of consecutive lines; empty when `count` is 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub count: usize,
}

impl LineSpan {
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    /// Span of `count` lines from `start`, if its end is addressable
    pub fn checked(start: usize, count: usize) -> Option<Self> {
        start.checked_add(count).map(|_| Self { start, count })
    }

    /// Index of the first line after the span
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.count)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Boundaries fixed by the channel count line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLayout {
    pub analog: LineSpan,
    pub status: LineSpan,
    pub frequency: usize,
    pub rate_count: usize,
}

impl ChannelLayout {
    /// Derive the channel boundaries, or `None` when the declared counts
    /// push a boundary past the addressable line range
    pub fn derive(analog_count: usize, status_count: usize) -> Option<Self> {
        let analog = LineSpan::checked(FIRST_CHANNEL_LINE, analog_count)?;
        let status = LineSpan::checked(analog.end(), status_count)?;
        let frequency = status.end();
        let rate_count = frequency.checked_add(1)?;
        rate_count.checked_add(1)?;

        Some(Self {
            analog,
            status,
            frequency,
            rate_count,
        })
    }
}

/// Boundaries fixed by the rate-count line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingLayout {
    pub segments: LineSpan,
    pub start_timestamp: usize,
    pub event_timestamp: usize,
    pub dat_filetype: usize,
    pub time_multiplier: usize,
    pub time_code: usize,
    pub tmq_code: usize,
}

impl TimingLayout {
    /// Derive the timing boundaries, or `None` when the segment count
    /// pushes a boundary past the addressable line range
    pub fn derive(rate_count_line: usize, segment_lines: usize) -> Option<Self> {
        let segments = LineSpan::checked(rate_count_line.checked_add(1)?, segment_lines)?;
        let start_timestamp = segments.end();
        // one past the trailer must stay addressable for the line count
        start_timestamp.checked_add(6)?;

        Some(Self {
            segments,
            start_timestamp,
            event_timestamp: start_timestamp + 1,
            dat_filetype: start_timestamp + 2,
            time_multiplier: start_timestamp + 3,
            time_code: start_timestamp + 4,
            tmq_code: start_timestamp + 5,
        })
    }

    /// Index of the last line a file of this revision carries
    pub fn last_line(&self, revision: Revision) -> usize {
        if revision.has_time_quality_trailer() {
            self.tmq_code
        } else if revision.has_time_multiplier() {
            self.time_multiplier
        } else {
            self.dat_filetype
        }
    }
}

/// Progressively derived line boundaries for one parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaLocator {
    channels: OnceCell<ChannelLayout>,
    timing: OnceCell<TimingLayout>,
}

impl SchemaLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channels(&self) -> Option<&ChannelLayout> {
        self.channels.get()
    }

    pub fn timing(&self) -> Option<&TimingLayout> {
        self.timing.get()
    }

    /// Record the channel layout read on `line`
    pub fn fix_channels(&mut self, line: usize, layout: ChannelLayout) -> Result<()> {
        self.channels
            .set(layout)
            .map_err(|_| ComtradeError::LayoutAlreadyFixed {
                line,
                layout: "channels",
            })?;
        debug!(
            "Channel layout: analog lines {}..{}, status lines {}..{}, frequency line {}, rate count line {}",
            layout.analog.start,
            layout.analog.end(),
            layout.status.start,
            layout.status.end(),
            layout.frequency,
            layout.rate_count
        );
        Ok(())
    }

    /// Record the timing layout read on `line`
    pub fn fix_timing(&mut self, line: usize, layout: TimingLayout) -> Result<()> {
        self.timing
            .set(layout)
            .map_err(|_| ComtradeError::LayoutAlreadyFixed {
                line,
                layout: "timing",
            })?;
        debug!(
            "Timing layout: segment lines {}..{}, start timestamp line {}, event line {}, file type line {}",
            layout.segments.start,
            layout.segments.end(),
            layout.start_timestamp,
            layout.event_timestamp,
            layout.dat_filetype
        );
        Ok(())
    }

    /// Decide which record shape line `index` must satisfy
    pub fn classify(&self, index: usize, revision: Revision) -> LineKind {
        match index {
            HEADER_LINE => return LineKind::Header,
            CHANNEL_COUNT_LINE => return LineKind::ChannelCounts,
            _ => {}
        }

        if let Some(channels) = self.channels.get() {
            if channels.analog.contains(index) {
                return LineKind::AnalogChannel;
            }
            if channels.status.contains(index) {
                return LineKind::StatusChannel;
            }
            if index == channels.frequency {
                return LineKind::Frequency;
            }
            if index == channels.rate_count {
                return LineKind::RateCount;
            }
        }

        if let Some(timing) = self.timing.get() {
            if timing.segments.contains(index) {
                return LineKind::RateSegment;
            }
            if index == timing.start_timestamp {
                return LineKind::StartTimestamp;
            }
            if index == timing.event_timestamp {
                return LineKind::EventTimestamp;
            }
            if index == timing.dat_filetype {
                return LineKind::DatFileType;
            }
            if index == timing.time_multiplier && revision.has_time_multiplier() {
                return LineKind::TimeMultiplier;
            }
            if index == timing.time_code && revision.has_time_quality_trailer() {
                return LineKind::TimeCode;
            }
            if index == timing.tmq_code && revision.has_time_quality_trailer() {
                return LineKind::TmqCode;
            }
        }

        LineKind::Unknown
    }

    /// Minimum number of lines a complete file must have, as far as known
    pub fn expected_line_count(&self, revision: Revision) -> usize {
        match (self.channels.get(), self.timing.get()) {
            (_, Some(timing)) => timing.last_line(revision) + 1,
            (Some(channels), None) => channels.rate_count + 1,
            (None, None) => CHANNEL_COUNT_LINE + 1,
        }
    }
}
