//! Date formatting capability.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Formats Unix timestamps for display.
pub trait DateFormatter: Send + Sync {
    /// Format a timestamp (seconds since the Unix epoch).
    fn format(&self, timestamp: i64) -> String;
}

/// `strftime`-style formatter in a fixed UTC offset.
#[derive(Clone, Debug)]
pub struct StrftimeFormatter {
    pattern: String,
    offset: FixedOffset,
}

impl StrftimeFormatter {
    /// Default pattern: day/month/year.
    pub const DEFAULT_PATTERN: &'static str = "%d/%m/%Y";

    /// Create a UTC formatter with the given pattern.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            offset: Utc.fix(),
        }
    }

    /// Use a fixed offset east of UTC, in minutes.
    ///
    /// Out-of-range offsets keep the current one.
    #[must_use]
    pub fn with_offset_minutes(mut self, minutes: i32) -> Self {
        if let Some(offset) = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
        {
            self.offset = offset;
        }
        self
    }
}

impl Default for StrftimeFormatter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATTERN)
    }
}

impl DateFormatter for StrftimeFormatter {
    fn format(&self, timestamp: i64) -> String {
        match DateTime::from_timestamp(timestamp, 0) {
            Some(dt) => {
                let mut out = String::new();
                let local = dt.with_timezone(&self.offset);
                if write!(out, "{}", local.format(&self.pattern)).is_err() {
                    tracing::warn!(pattern = %self.pattern, "Invalid date format pattern");
                    out.clear();
                }
                out
            }
            None => {
                tracing::debug!(timestamp, "Timestamp out of range");
                String::new()
            }
        }
    }
}

/// RFC 3339 representation of a timestamp, `None` if out of range.
#[must_use]
pub fn to_rfc3339(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.to_rfc3339())
}
