//! Request intake and moderation rules.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Request intake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestsConfig {
    /// Maximum submissions accepted from one IP inside the window.
    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max: u32,
    /// Sliding window length in minutes.
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_minutes: u32,
    /// Offset from UTC, in minutes, that defines the marketplace's local day.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
    /// Default page size for request listings.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
}

impl RequestsConfig {
    /// The local time zone used for request numbers and daily stats.
    ///
    /// Falls back to UTC when the configured offset is out of range.
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

impl Default for RequestsConfig {
    fn default() -> Self {
        Self {
            rate_limit_max: default_rate_limit_max(),
            rate_limit_window_minutes: default_rate_limit_window(),
            utc_offset_minutes: default_utc_offset(),
            default_page_size: default_page_size(),
        }
    }
}

/// Lawyer moderation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Minimum length, in characters, of a rejection reason.
    #[serde(default = "default_min_reason")]
    pub min_rejection_reason_chars: usize,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            min_rejection_reason_chars: default_min_reason(),
        }
    }
}

fn default_rate_limit_max() -> u32 {
    10
}

fn default_rate_limit_window() -> u32 {
    60
}

fn default_utc_offset() -> i32 {
    5 * 60
}

fn default_page_size() -> u64 {
    20
}

fn default_min_reason() -> usize {
    10
}
