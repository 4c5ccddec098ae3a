//! Parser configuration and policy switches.
//!
//! The defaults reproduce the permissive behaviour of existing COMTRADE
//! readers; each switch tightens one rule.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// How many sampling-rate segment lines a declared count of 0 consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RateSegmentPolicy {
    /// Consume exactly the declared number of segment lines (0 for 0)
    #[default]
    AsDeclared,
    /// Consume one placeholder segment line when the declared count is 0
    PlaceholderWhenZero,
}

impl RateSegmentPolicy {
    /// Number of segment lines to read for a declared count
    pub fn segment_lines(&self, declared: usize) -> usize {
        match self {
            RateSegmentPolicy::AsDeclared => declared,
            RateSegmentPolicy::PlaceholderWhenZero => declared.max(1),
        }
    }
}

/// Configuration for [`crate::cfg_parser::CfgParser`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Segment line accounting when the file declares 0 rates
    pub rate_segment_policy: RateSegmentPolicy,

    /// Fail on an unknown revision year instead of skipping the header
    pub strict_revision: bool,

    /// Fail when the declared channel total differs from analog + status
    pub check_channel_totals: bool,

    /// Fail when input ends before every expected line has been read
    pub require_complete: bool,
}

impl ParserConfig {
    /// Use the given rate segment policy
    pub fn with_rate_segment_policy(mut self, policy: RateSegmentPolicy) -> Self {
        self.rate_segment_policy = policy;
        self
    }

    /// Reject unknown revision years
    pub fn with_strict_revision(mut self) -> Self {
        self.strict_revision = true;
        self
    }

    /// Reject channel count lines whose total does not add up
    pub fn with_channel_total_check(mut self) -> Self {
        self.check_channel_totals = true;
        self
    }

    /// Reject truncated files
    pub fn with_require_complete(mut self) -> Self {
        self.require_complete = true;
        self
    }

    /// Every rule enabled
    pub fn strict() -> Self {
        Self::default()
            .with_strict_revision()
            .with_channel_total_check()
            .with_require_complete()
    }

    /// Log the effective configuration
    pub fn log_summary(&self) {
        debug!(
            "Parser config: rate_segment_policy={:?}, strict_revision={}, check_channel_totals={}, require_complete={}",
            self.rate_segment_policy,
            self.strict_revision,
            self.check_channel_totals,
            self.require_complete
        );
    }
}
