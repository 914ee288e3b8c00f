use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why an enrollment attempt was turned down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Already enrolled in this course this semester
    Duplicate,
    /// No seats left
    Full,
    /// The section is restricted to the other gender
    GenderMismatch,
    /// A meeting overlaps one of an enrolled course
    TimeConflict { course_name: String },
}

/// Outcome of validating one enrollment attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

impl From<Rejection> for Verdict {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Duplicate => write!(f, "already enrolled in this course"),
            Self::Full => write!(f, "course is full"),
            Self::GenderMismatch => write!(f, "course is not open to the student's gender"),
            Self::TimeConflict { course_name } => {
                write!(f, "time conflict with {course_name}")
            }
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected(rejection) => write!(f, "rejected: {rejection}"),
        }
    }
}
