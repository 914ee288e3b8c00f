use crate::{days::Weekday, error::CodecError};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// 24-hour clock format used by slot tokens and exam times
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Parses a 24-hour `HH:MM` time
pub fn parse_clock(text: &str) -> Result<NaiveTime, CodecError> {
    NaiveTime::parse_from_str(text.trim(), CLOCK_FORMAT)
        .map_err(|_| CodecError::InvalidTime(text.to_owned()))
}

/// Represents a time range for a meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub begin: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// Creates a new `TimeRange` if `begin` is before `end`
    pub fn new(begin: NaiveTime, end: NaiveTime) -> Option<Self> {
        (begin < end).then_some(Self { begin, end })
    }

    /// Parses two `HH:MM` strings and creates a `TimeRange` if valid.
    /// # Returns
    /// `Some(TimeRange)` if parsing succeeds and `begin` is before `end`
    pub fn from_strings(begin: &str, end: &str) -> Option<Self> {
        let begin = parse_clock(begin).ok()?;
        let end = parse_clock(end).ok()?;

        Self::new(begin, end)
    }

    /// Half-open overlap: `[a, b)` and `[c, d)` overlap iff `a < d && b > c`
    pub fn overlaps(&self, other: &Self) -> bool {
        self.begin < other.end && self.end > other.begin
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}-{}",
            self.begin.format(CLOCK_FORMAT),
            self.end.format(CLOCK_FORMAT)
        )
    }
}

/// A typed weekly meeting of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseTime {
    pub day: Weekday,
    pub time: TimeRange,
}

impl CourseTime {
    pub fn new(day: Weekday, time: TimeRange) -> Self {
        Self { day, time }
    }

    /// Whether two meetings fall on the same day and their times overlap
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.day == other.day && self.time.overlaps(&other.time)
    }

    /// Encodes this meeting back into slot notation
    pub fn token(&self) -> SlotToken {
        SlotToken(format!("d{}/{}", self.day.index(), self.time))
    }
}

/// One weekly meeting in the compact `d<day>/<HH:MM>-<HH:MM>` notation
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotToken(String);

impl SlotToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Decodes the token into a typed meeting.
    ///
    /// # Errors
    /// * [`CodecError::InvalidDay`] - no `d` prefix, no `/`, or a day outside 0-6
    /// * [`CodecError::InvalidTimeRange`] - the part after `/` is not two times joined by `-`
    /// * [`CodecError::InvalidTime`] - a time is not `HH:MM`
    /// * [`CodecError::EndBeforeStart`] - the end is not strictly after the start
    pub fn decode(&self) -> Result<CourseTime, CodecError> {
        let token = self.0.trim();
        let invalid_day = || CodecError::InvalidDay(token.to_owned());

        let rest = token.strip_prefix('d').ok_or_else(invalid_day)?;
        let (day, range) = rest.split_once('/').ok_or_else(invalid_day)?;
        let day = day
            .parse::<i64>()
            .ok()
            .and_then(Weekday::from_index)
            .ok_or_else(invalid_day)?;

        let parts = range.split('-').collect::<Vec<_>>();
        let [begin, end] = parts.as_slice() else {
            return Err(CodecError::InvalidTimeRange(range.to_owned()));
        };

        let begin = parse_clock(begin)?;
        let end = parse_clock(end)?;
        let time =
            TimeRange::new(begin, end).ok_or_else(|| CodecError::EndBeforeStart(token.to_owned()))?;

        Ok(CourseTime::new(day, time))
    }
}

impl From<String> for SlotToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for SlotToken {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

impl Display for SlotToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
