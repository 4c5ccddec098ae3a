//! Command-line interface components.

use crate::config::{ParserConfig, RateSegmentPolicy};
use crate::constants::DEFAULT_LOG_LEVEL;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "comtrade-cfg")]
#[command(about = "Parse a COMTRADE configuration (CFG) file and report its contents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the CFG file
    #[arg(value_name = "CFG_PATH")]
    pub cfg_path: PathBuf,

    /// Print the parsed record and diagnostics as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat an unknown revision year on the header line as an error
    #[arg(long)]
    pub strict_revision: bool,

    /// Reject files whose channel total differs from analog + status
    #[arg(long)]
    pub check_totals: bool,

    /// Read one placeholder sample-rate line when the file declares 0 rates
    #[arg(long)]
    pub placeholder_rate_line: bool,

    /// Reject files that end before every expected line
    #[arg(long)]
    pub require_complete: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Map CLI flags onto parser policies
    pub fn to_parser_config(&self) -> ParserConfig {
        let mut config = ParserConfig::default();
        if self.strict_revision {
            config = config.with_strict_revision();
        }
        if self.check_totals {
            config = config.with_channel_total_check();
        }
        if self.require_complete {
            config = config.with_require_complete();
        }
        if self.placeholder_rate_line {
            config = config.with_rate_segment_policy(RateSegmentPolicy::PlaceholderWhenZero);
        }
        config
    }

    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            DEFAULT_LOG_LEVEL
        }
    }
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("comtrade_cfg={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Human-readable and JSON reports of a parse outcome
pub mod report {
    use crate::cfg_parser::ParseOutcome;
    use crate::models::ParsedRecord;
    use anyhow::{Context, Result};
    use colored::*;

    /// Print the outcome as pretty JSON on stdout
    pub fn print_json(outcome: &ParseOutcome) -> Result<()> {
        let json =
            serde_json::to_string_pretty(outcome).context("Failed to serialize parse outcome")?;
        println!("{}", json);
        Ok(())
    }

    fn optional<T: std::fmt::Display>(value: Option<T>) -> String {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Print a coloured summary of the outcome on stdout
    pub fn print_summary(outcome: &ParseOutcome) {
        let record = &outcome.record;

        println!("{}", "COMTRADE configuration".bright_green().bold());
        println!("  {} {}", "Station:".bright_cyan(), record.station);
        println!("  {} {}", "Device:".bright_cyan(), record.device);
        println!("  {} {}", "Revision:".bright_cyan(), record.standard);
        println!(
            "  {} {} total ({} analog, {} status)",
            "Channels:".bright_cyan(),
            record.total_channels,
            record.analog_channel_count,
            record.status_channel_count
        );
        println!("  {} {} Hz", "Frequency:".bright_cyan(), record.frequency);

        print_channels(record);
        print_timing(record);

        if outcome.diagnostics.is_empty() {
            return;
        }

        println!();
        println!(
            "{} {}",
            "Skipped lines:".bright_yellow().bold(),
            outcome.diagnostics.len()
        );
        for diagnostic in &outcome.diagnostics {
            println!("  {}", diagnostic.to_string().yellow());
        }
    }

    fn print_channels(record: &ParsedRecord) {
        if !record.analog_channels.is_empty() {
            println!();
            println!("{}", "Analog channels".bright_white().bold());
            for ch in &record.analog_channels {
                println!(
                    "  {:>4} {:<20} {:<3} {:<6} a={} b={} ratio={}:{} {}",
                    ch.n.to_string().bright_yellow(),
                    ch.name,
                    ch.phase,
                    ch.uu,
                    ch.a,
                    ch.b,
                    ch.primary,
                    ch.secondary,
                    ch.pors.bright_black()
                );
            }
        }

        if !record.status_channels.is_empty() {
            println!();
            println!("{}", "Status channels".bright_white().bold());
            for ch in &record.status_channels {
                println!(
                    "  {:>4} {:<20} {:<3} normal={}",
                    ch.n.to_string().bright_yellow(),
                    ch.name,
                    ch.phase,
                    ch.y
                );
            }
        }
    }

    fn print_timing(record: &ParsedRecord) {
        println!();
        println!("{}", "Sampling".bright_white().bold());
        println!(
            "  {} {}{}",
            "Rates:".bright_cyan(),
            record.nrates,
            if record.timestamp_critical {
                " (timestamp critical)".bright_red().to_string()
            } else {
                String::new()
            }
        );
        for segment in &record.sample_rates {
            println!(
                "    {} Hz up to sample {}",
                segment.samp, segment.endsamp
            );
        }
        println!(
            "  {} {}",
            "First sample:".bright_cyan(),
            optional(record.start_timestamp)
        );
        println!(
            "  {} {}",
            "Trigger:".bright_cyan(),
            optional(record.event_timestamp)
        );
        println!(
            "  {} {}",
            "DAT file type:".bright_cyan(),
            record.dat_filetype
        );
        println!(
            "  {} {}",
            "Time multiplier:".bright_cyan(),
            optional(record.time_multiplier)
        );

        if record.standard.has_time_quality_trailer() {
            println!(
                "  {} {} / {}",
                "Time code / local:".bright_cyan(),
                optional(record.time_code.as_deref()),
                optional(record.local_code.as_deref())
            );
            println!(
                "  {} {} / {}",
                "TMQ / leap second:".bright_cyan(),
                optional(record.tmq_code.as_deref()),
                optional(record.leap_second.as_deref())
            );
        }
    }
}
