use crate::course::Course;
use models::gender::Gender;
use uuid::Uuid;

/// The student attempting to enroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Student {
    pub id: Uuid,
    pub gender: Gender,
}

/// Identifies one offering of a course in a semester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionKey {
    pub course_id: Uuid,
    pub semester_id: Uuid,
}

impl SectionKey {
    pub fn of(course: &Course) -> Self {
        Self {
            course_id: course.id,
            semester_id: course.semester_id,
        }
    }
}

/// Everything needed to decide one enrollment attempt, assembled by the
/// caller from storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentContext {
    /// The course being added
    pub course: Course,
    pub student: Student,
    /// Courses the student is already enrolled in this semester
    pub schedule: Vec<Course>,
    /// Active enrollments in the course's section
    pub enrolled_count: usize,
}

impl EnrollmentContext {
    pub fn section(&self) -> SectionKey {
        SectionKey::of(&self.course)
    }
}
