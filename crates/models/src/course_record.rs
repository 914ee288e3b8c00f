use crate::{course_time::SlotToken, exam::ExamWindow};
use serde::{Deserialize, Serialize};

/// Number of meeting columns the portal exposes per course
pub const MAX_MEETINGS: usize = 5;

/// One course as scraped from a faculty's portal export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course identifier (e.g., "1214012_01")
    pub course_id: String,
    /// Course name, with a level suffix for graduate sections
    pub name: String,
    /// Credit weight
    pub weight: Option<u32>,
    /// Seat capacity
    pub capacity: Option<i32>,
    /// Gender restriction as printed on the portal
    pub gender: String,
    /// Professor's display name
    pub professor: String,
    /// Faculty code, taken from the export's file name
    pub faculty: String,
    /// Weekly meetings, at most [`MAX_MEETINGS`]
    pub times: Vec<SlotToken>,
    /// Final exam, if scheduled
    pub exam: Option<ExamWindow>,
}

impl CourseRecord {
    /// The meeting in portal column `index` (0-based), if any
    pub fn time(&self, index: usize) -> Option<&SlotToken> {
        self.times.get(index)
    }
}
