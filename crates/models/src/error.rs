use thiserror::Error;

/// Errors produced while decoding slot tokens and exam windows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Missing `d` prefix, missing `/`, or a day index outside 0-6
    #[error("invalid day in slot '{0}'")]
    InvalidDay(String),

    /// The time part does not split into exactly two times
    #[error("invalid time range '{0}'")]
    InvalidTimeRange(String),

    /// A time is not in 24-hour `HH:MM` form
    #[error("invalid time '{0}'")]
    InvalidTime(String),

    /// The end of a slot is not strictly after its start
    #[error("end time is not after start time in slot '{0}'")]
    EndBeforeStart(String),

    /// An exam date is not in `YYYY/MM/DD` form
    #[error("invalid exam date '{0}'")]
    InvalidExamDate(String),

    /// The exam ends at or before its start
    #[error("exam end is not after exam start in '{0}'")]
    InvalidExamWindow(String),
}
