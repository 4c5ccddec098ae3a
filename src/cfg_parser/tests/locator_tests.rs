//! Tests for line boundary derivation and shape dispatch

use crate::cfg_parser::locator::{ChannelLayout, LineKind, LineSpan, SchemaLocator, TimingLayout};
use crate::error::ComtradeError;
use crate::models::Revision;

fn located(analog: usize, status: usize, rate_line_segments: usize) -> SchemaLocator {
    let mut locator = SchemaLocator::new();
    let channels = ChannelLayout::derive(analog, status).unwrap();
    locator.fix_channels(1, channels).unwrap();
    locator
        .fix_timing(
            channels.rate_count,
            TimingLayout::derive(channels.rate_count, rate_line_segments).unwrap(),
        )
        .unwrap();
    locator
}

#[test]
fn test_fixed_lines_before_any_layout() {
    let locator = SchemaLocator::new();

    assert_eq!(locator.classify(0, Revision::Rev1999), LineKind::Header);
    assert_eq!(locator.classify(1, Revision::Rev1999), LineKind::ChannelCounts);
    assert_eq!(locator.classify(2, Revision::Rev1999), LineKind::Unknown);
    assert_eq!(locator.expected_line_count(Revision::Rev1999), 2);
}

#[test]
fn test_channel_layout_boundaries() {
    let layout = ChannelLayout::derive(4, 16).unwrap();

    assert_eq!(layout.analog, LineSpan::new(2, 4));
    assert_eq!(layout.status, LineSpan::new(6, 16));
    assert_eq!(layout.frequency, 22);
    assert_eq!(layout.rate_count, 23);
}

#[test]
fn test_empty_spans() {
    let layout = ChannelLayout::derive(0, 0).unwrap();

    assert!(layout.analog.is_empty());
    assert!(!layout.analog.contains(2));
    assert_eq!(layout.frequency, 2);

    let timing = TimingLayout::derive(3, 0).unwrap();
    assert!(timing.segments.is_empty());
    assert_eq!(timing.start_timestamp, 4);
}

#[test]
fn test_unaddressable_boundaries_are_rejected() {
    assert_eq!(ChannelLayout::derive(0, usize::MAX), None);
    assert_eq!(ChannelLayout::derive(usize::MAX - 2, 0), None);
    assert_eq!(ChannelLayout::derive(1, usize::MAX - 3), None);
    assert_eq!(TimingLayout::derive(3, usize::MAX), None);
    assert_eq!(TimingLayout::derive(usize::MAX, 0), None);
    assert_eq!(TimingLayout::derive(3, usize::MAX - 9), None);
    assert_eq!(LineSpan::checked(usize::MAX, 1), None);

    // Largest counts that still leave every boundary addressable
    let channels = ChannelLayout::derive(usize::MAX - 4, 0).unwrap();
    assert_eq!(channels.rate_count, usize::MAX - 1);
    let timing = TimingLayout::derive(3, usize::MAX - 10).unwrap();
    assert_eq!(timing.tmq_code, usize::MAX - 1);
}

#[test]
fn test_classify_full_layout() {
    let locator = located(2, 1, 2);
    let kinds: Vec<LineKind> = (0..15)
        .map(|index| locator.classify(index, Revision::Rev2013))
        .collect();

    assert_eq!(
        kinds,
        vec![
            LineKind::Header,
            LineKind::ChannelCounts,
            LineKind::AnalogChannel,
            LineKind::AnalogChannel,
            LineKind::StatusChannel,
            LineKind::Frequency,
            LineKind::RateCount,
            LineKind::RateSegment,
            LineKind::RateSegment,
            LineKind::StartTimestamp,
            LineKind::EventTimestamp,
            LineKind::DatFileType,
            LineKind::TimeMultiplier,
            LineKind::TimeCode,
            LineKind::TmqCode,
        ]
    );
    assert_eq!(locator.classify(15, Revision::Rev2013), LineKind::Unknown);
    assert_eq!(locator.expected_line_count(Revision::Rev2013), 15);
}

#[test]
fn test_revision_gates_trailer_lines() {
    let locator = located(0, 0, 1);
    // dat file type on line 7
    assert_eq!(locator.classify(7, Revision::Rev1991), LineKind::DatFileType);

    assert_eq!(locator.classify(8, Revision::Rev1991), LineKind::Unknown);
    assert_eq!(locator.classify(8, Revision::Rev2001), LineKind::TimeMultiplier);
    assert_eq!(locator.classify(9, Revision::Rev2001), LineKind::Unknown);
    assert_eq!(locator.classify(10, Revision::Rev1999), LineKind::Unknown);
    assert_eq!(locator.classify(9, Revision::Rev2013), LineKind::TimeCode);
    assert_eq!(locator.classify(10, Revision::Rev2013), LineKind::TmqCode);

    assert_eq!(locator.expected_line_count(Revision::Rev1991), 8);
    assert_eq!(locator.expected_line_count(Revision::Rev2001), 9);
}

#[test]
fn test_layouts_are_write_once() {
    let mut locator = located(1, 1, 1);

    let err = locator
        .fix_channels(1, ChannelLayout::derive(3, 3).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        ComtradeError::LayoutAlreadyFixed {
            layout: "channels",
            ..
        }
    ));

    let err = locator
        .fix_timing(5, TimingLayout::derive(5, 2).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        ComtradeError::LayoutAlreadyFixed {
            layout: "timing",
            ..
        }
    ));

    // Original boundaries survive the rejected writes
    assert_eq!(locator.channels().unwrap().analog, LineSpan::new(2, 1));
    assert_eq!(locator.timing().unwrap().segments.count, 1);
}
