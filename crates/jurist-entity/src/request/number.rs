//! Human-readable request numbers (`REQ-YYYYMMDD-NNNN`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use jurist_core::AppError;
use serde::{Deserialize, Serialize};

/// A request number: the local calendar day plus the day's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequestNumber {
    day: NaiveDate,
    seq: u32,
}

impl RequestNumber {
    /// Build a number for the `seq`-th submission of `day` (1-based).
    pub fn new(day: NaiveDate, seq: u32) -> Self {
        Self { day, seq }
    }

    /// The local calendar day.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// The per-day sequence value.
    pub fn seq(&self) -> u32 {
        self.seq
    }
}

impl fmt::Display for RequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REQ-{}-{:04}", self.day.format("%Y%m%d"), self.seq)
    }
}

impl FromStr for RequestNumber {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::validation(format!("Invalid request number: '{s}'"));
        let rest = s.strip_prefix("REQ-").ok_or_else(invalid)?;
        let (date, seq) = rest.split_once('-').ok_or_else(invalid)?;
        if date.len() != 8 || seq.len() < 4 || !seq.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let day = NaiveDate::parse_from_str(date, "%Y%m%d").map_err(|_| invalid())?;
        let seq: u32 = seq.parse().map_err(|_| invalid())?;
        if seq == 0 {
            return Err(invalid());
        }
        Ok(Self { day, seq })
    }
}

impl TryFrom<String> for RequestNumber {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RequestNumber> for String {
    fn from(value: RequestNumber) -> Self {
        value.to_string()
    }
}

/// The calendar day `now` falls on in the given local offset.
pub fn local_day(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// The UTC instant of the most recent local midnight at or before `now`.
pub fn local_midnight(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let day = local_day(now, offset);
    let midnight = day.and_hms_opt(0, 0, 0).unwrap_or_default();
    // Fixed offsets have no gaps, so the local time always maps to one instant.
    offset
        .from_local_datetime(&midnight)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now)
}
