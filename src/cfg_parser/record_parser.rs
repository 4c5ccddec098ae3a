//! Per-shape record extraction
//!
//! Each function takes the split fields of one line whose shape has
//! already been decided by the locator, checks the field count, and parses
//! the typed values. Arity and value failures are fatal.

use super::datetime::parse_timestamp;
use super::field_parsers::{
    LineContext, field_or_default, parse_count, parse_float, parse_integer, parse_sample_number,
    parse_suffixed_count,
};
use crate::constants::{ANALOG_SUFFIX, STATUS_SUFFIX, arity, fields};
use crate::error::Result;
use crate::models::{AnalogChannel, Revision, SampleRateSegment, StatusChannel};
use chrono::NaiveDateTime;

/// Outcome of reading the header line
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderLine {
    Parsed {
        station: String,
        device: String,
        revision: Revision,
    },
    /// Three fields, but the revision year is not one we know
    UnknownRevision(String),
    /// Field count matches no header form
    Unrecognized,
}

/// Read `station,device` or `station,device,revision`
///
/// An empty revision field counts as absent.
pub fn parse_header(values: &[&str]) -> HeaderLine {
    let revision = match values.len() {
        arity::HEADER_SHORT => Revision::default(),
        arity::HEADER_FULL if values[2].is_empty() => Revision::default(),
        arity::HEADER_FULL => match values[2].parse() {
            Ok(revision) => revision,
            Err(_) => return HeaderLine::UnknownRevision(values[2].to_string()),
        },
        _ => return HeaderLine::Unrecognized,
    };

    HeaderLine::Parsed {
        station: values[0].to_string(),
        device: values[1].to_string(),
        revision,
    }
}

/// Channel totals declared on line 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelCounts {
    pub total: usize,
    pub analog: usize,
    pub status: usize,
}

/// Read `total,<n>A,<n>D`; empty fields take their declared defaults
pub fn parse_channel_counts(values: &[&str], ctx: &LineContext) -> Result<ChannelCounts> {
    ctx.expect_arity(values, &[arity::CHANNEL_COUNTS], "channel count")?;

    let total = field_or_default(fields::TOTAL_CHANNELS, values[0]);
    let analog = field_or_default(fields::ANALOG_COUNT, values[1]);
    let status = field_or_default(fields::STATUS_COUNT, values[2]);

    Ok(ChannelCounts {
        total: parse_count(ctx, fields::TOTAL_CHANNELS, total)?,
        analog: parse_suffixed_count(ctx, fields::ANALOG_COUNT, analog, ANALOG_SUFFIX)?,
        status: parse_suffixed_count(ctx, fields::STATUS_COUNT, status, STATUS_SUFFIX)?,
    })
}

/// Read an analog channel line
///
/// 1991 files may use the 10-field form without primary, secondary and pors.
pub fn parse_analog_channel(
    values: &[&str],
    revision: Revision,
    ctx: &LineContext,
) -> Result<AnalogChannel> {
    let allowed: &[usize] = match revision {
        Revision::Rev1991 => &[arity::ANALOG_CHANNEL, arity::ANALOG_CHANNEL_1991],
        _ => &[arity::ANALOG_CHANNEL],
    };
    ctx.expect_arity(values, allowed, "analog channel")?;

    let mut channel = AnalogChannel::without_ratio(
        parse_count(ctx, "An", values[0])?,
        values[1].to_string(),
        values[2].to_string(),
        values[3].to_string(),
        values[4].to_string(),
        parse_float(ctx, "a", values[5])?,
        parse_float(ctx, "b", values[6])?,
        parse_float(ctx, "skew", values[7])?,
        parse_float(ctx, "min", values[8])?,
        parse_float(ctx, "max", values[9])?,
    );

    if values.len() == arity::ANALOG_CHANNEL {
        channel.primary = parse_float(ctx, "primary", values[10])?;
        channel.secondary = parse_float(ctx, "secondary", values[11])?;
        channel.pors = values[12].to_string();
    }

    Ok(channel)
}

/// Read a status channel line
///
/// 1991 files may use the 3-field form `n,name,y`.
pub fn parse_status_channel(
    values: &[&str],
    revision: Revision,
    ctx: &LineContext,
) -> Result<StatusChannel> {
    let allowed: &[usize] = match revision {
        Revision::Rev1991 => &[arity::STATUS_CHANNEL, arity::STATUS_CHANNEL_1991],
        _ => &[arity::STATUS_CHANNEL],
    };
    ctx.expect_arity(values, allowed, "status channel")?;

    let n = parse_count(ctx, "Dn", values[0])?;
    let name = values[1].to_string();

    if values.len() == arity::STATUS_CHANNEL_1991 {
        return Ok(StatusChannel {
            n,
            name,
            phase: String::new(),
            ccbm: String::new(),
            y: parse_integer(ctx, "y", values[2])?,
        });
    }

    Ok(StatusChannel {
        n,
        name,
        phase: values[2].to_string(),
        ccbm: values[3].to_string(),
        y: parse_integer(ctx, "y", values[4])?,
    })
}

pub fn parse_frequency(values: &[&str], ctx: &LineContext) -> Result<f64> {
    ctx.expect_arity(values, &[arity::SINGLE], "frequency")?;
    parse_float(ctx, "lf", values[0])
}

/// Read the declared (pre-normalization) number of rate segments
pub fn parse_rate_count(values: &[&str], ctx: &LineContext) -> Result<usize> {
    ctx.expect_arity(values, &[arity::SINGLE], "rate count")?;
    parse_count(ctx, "nrates", values[0])
}

pub fn parse_rate_segment(values: &[&str], ctx: &LineContext) -> Result<SampleRateSegment> {
    ctx.expect_arity(values, &[arity::PAIR], "sample rate")?;
    Ok(SampleRateSegment {
        samp: parse_float(ctx, "samp", values[0])?,
        endsamp: parse_sample_number(ctx, "endsamp", values[1])?,
    })
}

/// Read a `date,time` line using the revision's date order
pub fn parse_timestamp_line(
    values: &[&str],
    revision: Revision,
    ctx: &LineContext,
) -> Result<NaiveDateTime> {
    ctx.expect_arity(values, &[arity::PAIR], "timestamp")?;
    parse_timestamp(values[0], values[1], revision.date_order())
        .map_err(|e| ctx.invalid_datetime(e.to_string()))
}

pub fn parse_dat_filetype(values: &[&str], ctx: &LineContext) -> Result<String> {
    ctx.expect_arity(values, &[arity::SINGLE], "file type")?;
    Ok(values[0].to_string())
}

/// Read the time multiplier; an empty field means 1.0
pub fn parse_time_multiplier(values: &[&str], ctx: &LineContext) -> Result<f64> {
    ctx.expect_arity(values, &[arity::SINGLE], "time multiplier")?;
    let value = field_or_default(fields::TIME_MULTIPLIER, values[0]);
    parse_float(ctx, fields::TIME_MULTIPLIER, value)
}

/// Read one of the 2013 trailer pairs (time/local code, TMQ/leap second)
pub fn parse_code_pair(values: &[&str], shape: &str, ctx: &LineContext) -> Result<(String, String)> {
    ctx.expect_arity(values, &[arity::PAIR], shape)?;
    Ok((values[0].to_string(), values[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg_parser::field_parsers::split_fields;
    use crate::error::ComtradeError;

    fn ctx(content: &str) -> LineContext<'_> {
        LineContext::new(3, content)
    }

    #[test]
    fn test_header_forms() {
        assert_eq!(
            parse_header(&["StationA", "DeviceB"]),
            HeaderLine::Parsed {
                station: "StationA".to_string(),
                device: "DeviceB".to_string(),
                revision: Revision::Rev1991,
            }
        );
        assert_eq!(
            parse_header(&["S", "D", ""]),
            HeaderLine::Parsed {
                station: "S".to_string(),
                device: "D".to_string(),
                revision: Revision::Rev1991,
            }
        );
        assert_eq!(
            parse_header(&["S", "D", "2099"]),
            HeaderLine::UnknownRevision("2099".to_string())
        );
        assert_eq!(parse_header(&["S"]), HeaderLine::Unrecognized);
        assert_eq!(parse_header(&["S", "D", "2013", "x"]), HeaderLine::Unrecognized);
    }

    #[test]
    fn test_analog_channel_full_form() {
        let line = "1,IA,A,Line 1,kA,0.01,0,0,-32767,32767,1200,5,S";
        let values = split_fields(line);
        let channel = parse_analog_channel(&values, Revision::Rev1999, &ctx(line)).unwrap();

        assert_eq!(channel.n, 1);
        assert_eq!(channel.name, "IA");
        assert_eq!(channel.ccbm, "Line 1");
        assert_eq!(channel.uu, "kA");
        assert_eq!(channel.a, 0.01);
        assert_eq!(channel.cmin, -32767.0);
        assert_eq!(channel.primary, 1200.0);
        assert_eq!(channel.secondary, 5.0);
        assert_eq!(channel.pors, "S");
    }

    #[test]
    fn test_analog_channel_1991_short_form() {
        let line = "2,VB,B,,kV,0.1,0,0,-2048,2047";
        let values = split_fields(line);
        let channel = parse_analog_channel(&values, Revision::Rev1991, &ctx(line)).unwrap();
        assert_eq!(channel.primary, 1.0);
        assert_eq!(channel.secondary, 1.0);
        assert_eq!(channel.pors, "S");

        // Short form is only accepted for 1991
        let err = parse_analog_channel(&values, Revision::Rev2013, &ctx(line)).unwrap_err();
        assert!(matches!(err, ComtradeError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_status_channel_forms() {
        let line = "1,TRIP,,CB1,0";
        let values = split_fields(line);
        let channel = parse_status_channel(&values, Revision::Rev2001, &ctx(line)).unwrap();
        assert_eq!(channel.ccbm, "CB1");
        assert_eq!(channel.y, 0);

        let line = "4,52A,1";
        let values = split_fields(line);
        let channel = parse_status_channel(&values, Revision::Rev1991, &ctx(line)).unwrap();
        assert_eq!(channel.n, 4);
        assert_eq!(channel.name, "52A");
        assert_eq!(channel.phase, "");
        assert_eq!(channel.y, 1);
    }

    #[test]
    fn test_channel_counts_defaults() {
        let counts = parse_channel_counts(&["", "", ""], &ctx(",,")).unwrap();
        assert_eq!(
            counts,
            ChannelCounts {
                total: 0,
                analog: 0,
                status: 0
            }
        );

        let counts = parse_channel_counts(&["5", "", "5D"], &ctx("5,,5D")).unwrap();
        assert_eq!(counts.analog, 0);
        assert_eq!(counts.status, 5);
    }

    #[test]
    fn test_time_multiplier_default() {
        assert_eq!(parse_time_multiplier(&[""], &ctx("")).unwrap(), 1.0);
        assert_eq!(parse_time_multiplier(&["0.001"], &ctx("0.001")).unwrap(), 0.001);
        assert!(parse_time_multiplier(&["1x"], &ctx("1x")).is_err());
    }

    #[test]
    fn test_timestamp_line_errors_are_datetime_errors() {
        let err = parse_timestamp_line(&["00/04/1999", "12:00:00"], Revision::Rev1999, &ctx("x"))
            .unwrap_err();
        assert!(matches!(err, ComtradeError::InvalidDateTime { line: 3, .. }));

        let err = parse_timestamp_line(&["01/04/1999"], Revision::Rev1999, &ctx("x")).unwrap_err();
        assert!(matches!(err, ComtradeError::MalformedRecord { .. }));
    }
}
