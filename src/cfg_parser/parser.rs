//! Core CFG parser implementation
//!
//! This module drives the line-by-line fold: each line is classified by the
//! schema locator, handed to the matching record extractor, and folded into
//! the accumulating record. Lines matching no shape become diagnostics.

use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use super::diagnostics::{Diagnostic, DiagnosticKind, ParseOutcome};
use super::field_parsers::{LineContext, split_fields};
use super::locator::{ChannelLayout, LineKind, SchemaLocator, TimingLayout};
use super::record_parser::{
    HeaderLine, parse_analog_channel, parse_channel_counts, parse_code_pair, parse_dat_filetype,
    parse_frequency, parse_header, parse_rate_count, parse_rate_segment, parse_status_channel,
    parse_time_multiplier, parse_timestamp_line,
};
use crate::config::ParserConfig;
use crate::constants::HEADER_LINE;
use crate::error::{ComtradeError, Result};
use crate::models::ParsedRecord;

/// Byte order mark some tools write at the start of CFG files
const BYTE_ORDER_MARK: char = '\u{feff}';

/// COMTRADE configuration file parser
///
/// The parser itself is stateless apart from its policy configuration;
/// every parse threads a fresh [`ParseState`] through the input lines.
#[derive(Debug, Clone, Default)]
pub struct CfgParser {
    config: ParserConfig,
}

impl CfgParser {
    /// Create a new parser with the given policies
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse an ordered sequence of CFG lines
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let state = lines
            .into_iter()
            .enumerate()
            .try_fold(ParseState::default(), |state, (index, line)| {
                state.consume(index, line.as_ref(), &self.config)
            })?;
        state.finish(&self.config)
    }

    /// Parse CFG content held in memory
    pub fn parse_str(&self, content: &str) -> Result<ParseOutcome> {
        self.parse_lines(content.lines())
    }

    /// Parse CFG content from a buffered reader, one line at a time
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub async fn parse_reader<R>(&self, mut reader: R) -> Result<ParseOutcome>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut state = ParseState::default();
        let mut buffer = Vec::new();
        let mut index = 0;

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer).await? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buffer);
            state = state.consume(index, &line, &self.config)?;
            index += 1;
        }

        state.finish(&self.config)
    }

    /// Parse a CFG file from disk
    pub async fn parse_file(&self, file_path: &Path) -> Result<ParseOutcome> {
        info!("Parsing CFG file: {}", file_path.display());
        self.config.log_summary();

        let file = File::open(file_path).await.map_err(ComtradeError::Io)?;
        let outcome = self.parse_reader(BufReader::new(file)).await?;

        info!(
            "Parsed {} ({} revision): {} analog, {} status channels, {} skipped lines",
            file_path.display(),
            outcome.record.standard,
            outcome.record.analog_channels.len(),
            outcome.record.status_channels.len(),
            outcome.diagnostics.len()
        );
        Ok(outcome)
    }
}

/// Running state of one parse: the record, the locator and the diagnostics
#[derive(Debug, Clone, Default)]
struct ParseState {
    record: ParsedRecord,
    locator: SchemaLocator,
    diagnostics: Vec<Diagnostic>,
    lines_read: usize,
}

impl ParseState {
    /// Fold one line into the state
    fn consume(mut self, index: usize, line: &str, config: &ParserConfig) -> Result<Self> {
        let mut raw = line.trim_end_matches(['\r', '\n']);
        if index == HEADER_LINE {
            raw = raw.trim_start_matches(BYTE_ORDER_MARK);
        }

        let ctx = LineContext::new(index, raw);
        let values = split_fields(raw);
        let revision = self.record.standard;
        let kind = self.locator.classify(index, revision);

        match kind {
            LineKind::Header => self.apply_header(&values, &ctx, config)?,
            LineKind::ChannelCounts => self.apply_channel_counts(&values, &ctx, config)?,
            LineKind::AnalogChannel => {
                let channel = parse_analog_channel(&values, revision, &ctx)?;
                self.record.analog_channels.push(channel);
            }
            LineKind::StatusChannel => {
                let channel = parse_status_channel(&values, revision, &ctx)?;
                self.record.status_channels.push(channel);
            }
            LineKind::Frequency => {
                self.record.frequency = parse_frequency(&values, &ctx)?;
            }
            LineKind::RateCount => self.apply_rate_count(&values, &ctx, config)?,
            LineKind::RateSegment => {
                let segment = parse_rate_segment(&values, &ctx)?;
                self.record.sample_rates.push(segment);
            }
            LineKind::StartTimestamp => {
                let timestamp = parse_timestamp_line(&values, revision, &ctx)?;
                self.record.start_timestamp = Some(timestamp);
            }
            LineKind::EventTimestamp => {
                let timestamp = parse_timestamp_line(&values, revision, &ctx)?;
                self.record.event_timestamp = Some(timestamp);
            }
            LineKind::DatFileType => {
                self.record.dat_filetype = parse_dat_filetype(&values, &ctx)?;
            }
            LineKind::TimeMultiplier => {
                self.record.time_multiplier = Some(parse_time_multiplier(&values, &ctx)?);
            }
            LineKind::TimeCode => {
                let (time_code, local_code) = parse_code_pair(&values, "time code", &ctx)?;
                self.record.time_code = Some(time_code);
                self.record.local_code = Some(local_code);
            }
            LineKind::TmqCode => {
                let (tmq_code, leap_second) = parse_code_pair(&values, "time quality", &ctx)?;
                self.record.tmq_code = Some(tmq_code);
                self.record.leap_second = Some(leap_second);
            }
            LineKind::Unknown => self.skip(&ctx, DiagnosticKind::UnrecognizedLine),
        }

        if kind != LineKind::Unknown {
            debug!("Line {}: {:?}", index, kind);
        }
        self.lines_read = index + 1;
        Ok(self)
    }

    fn apply_header(
        &mut self,
        values: &[&str],
        ctx: &LineContext,
        config: &ParserConfig,
    ) -> Result<()> {
        match parse_header(values) {
            HeaderLine::Parsed {
                station,
                device,
                revision,
            } => {
                self.record.station = station;
                self.record.device = device;
                self.record.standard = revision;
            }
            HeaderLine::UnknownRevision(token) if config.strict_revision => {
                return Err(ComtradeError::UnknownRevision {
                    line: ctx.index,
                    token,
                });
            }
            HeaderLine::UnknownRevision(_) => {
                self.skip(ctx, DiagnosticKind::UnrecognizedRevision);
            }
            HeaderLine::Unrecognized => self.skip(ctx, DiagnosticKind::UnrecognizedLine),
        }
        Ok(())
    }

    fn apply_channel_counts(
        &mut self,
        values: &[&str],
        ctx: &LineContext,
        config: &ParserConfig,
    ) -> Result<()> {
        let counts = parse_channel_counts(values, ctx)?;

        if config.check_channel_totals
            && counts.analog.checked_add(counts.status) != Some(counts.total)
        {
            return Err(ComtradeError::ChannelTotalMismatch {
                line: ctx.index,
                total: counts.total,
                analog: counts.analog,
                status: counts.status,
            });
        }

        self.record.total_channels = counts.total;
        self.record.analog_channel_count = counts.analog;
        self.record.status_channel_count = counts.status;
        let layout = ChannelLayout::derive(counts.analog, counts.status)
            .ok_or_else(|| ctx.malformed("declared channel counts exceed the line index range"))?;
        self.locator.fix_channels(ctx.index, layout)
    }

    fn apply_rate_count(
        &mut self,
        values: &[&str],
        ctx: &LineContext,
        config: &ParserConfig,
    ) -> Result<()> {
        let declared = parse_rate_count(values, ctx)?;
        let segment_lines = config.rate_segment_policy.segment_lines(declared);

        self.record.timestamp_critical = declared == 0;
        self.record.nrates = declared.max(1);

        let layout = TimingLayout::derive(ctx.index, segment_lines)
            .ok_or_else(|| ctx.malformed("declared rate count exceeds the line index range"))?;
        self.locator.fix_timing(ctx.index, layout)
    }

    fn skip(&mut self, ctx: &LineContext, kind: DiagnosticKind) {
        warn!("Skipping line {} ({:?}): '{}'", ctx.index, kind, ctx.content);
        self.diagnostics.push(Diagnostic {
            line: ctx.index,
            content: ctx.content.to_string(),
            kind,
        });
    }

    /// Close the parse, checking the input reached every expected line
    fn finish(self, config: &ParserConfig) -> Result<ParseOutcome> {
        let expected_lines = self.locator.expected_line_count(self.record.standard);

        if self.lines_read < expected_lines {
            if config.require_complete {
                return Err(ComtradeError::IncompleteRecord {
                    expected_lines,
                    found_lines: self.lines_read,
                });
            }
            warn!(
                "Input ended after {} lines, expected at least {}",
                self.lines_read, expected_lines
            );
        }

        Ok(ParseOutcome {
            record: self.record,
            diagnostics: self.diagnostics,
        })
    }
}
