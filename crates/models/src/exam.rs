use crate::{
    course_time::{CLOCK_FORMAT, parse_clock},
    error::CodecError,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Date format of exam dates on the portal
pub const EXAM_DATE_FORMAT: &str = "%Y/%m/%d";

/// The absolute time window of a course's final exam
///
/// Portal dates are taken as-is; no calendar conversion happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ExamWindow {
    /// Creates a new `ExamWindow` if `start` is before `end`
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Combines a `YYYY/MM/DD` date and an `HH:MM-HH:MM` range.
    ///
    /// `.` separators in the date are accepted and treated as `/`.
    ///
    /// # Errors
    /// * [`CodecError::InvalidExamDate`] - the date does not parse
    /// * [`CodecError::InvalidTimeRange`] - the range is not two times joined by `-`
    /// * [`CodecError::InvalidTime`] - a time is not `HH:MM`
    /// * [`CodecError::InvalidExamWindow`] - the end is not after the start
    pub fn parse(date: &str, range: &str) -> Result<Self, CodecError> {
        let date_text = date.trim().replace('.', "/");
        let day = NaiveDate::parse_from_str(&date_text, EXAM_DATE_FORMAT)
            .map_err(|_| CodecError::InvalidExamDate(date.to_owned()))?;

        let (begin, end) = range
            .split_once('-')
            .filter(|(_, end)| !end.contains('-'))
            .ok_or_else(|| CodecError::InvalidTimeRange(range.to_owned()))?;

        let start = day.and_time(parse_clock(begin)?);
        let end = day.and_time(parse_clock(end)?);

        Self::new(start, end)
            .ok_or_else(|| CodecError::InvalidExamWindow(format!("{date_text} {range}")))
    }

    /// Exam date in portal form, e.g. `1403/10/15`
    pub fn date_text(&self) -> String {
        self.start.format(EXAM_DATE_FORMAT).to_string()
    }

    /// Exam time range in portal form, e.g. `09:00-11:00`
    pub fn time_text(&self) -> String {
        format!(
            "{}-{}",
            self.start.format(CLOCK_FORMAT),
            self.end.format(CLOCK_FORMAT)
        )
    }
}
