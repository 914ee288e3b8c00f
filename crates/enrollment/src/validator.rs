use crate::{
    context::EnrollmentContext,
    course::Course,
    verdict::{Rejection, Verdict},
};
use log::debug;

/// Whether the section has no seat left for one more student
fn is_full(course: &Course, enrolled_count: usize) -> bool {
    usize::try_from(course.capacity).map_or(true, |capacity| enrolled_count >= capacity)
}

/// Finds the first scheduled course with a meeting overlapping `course`
///
/// # Arguments
/// * `course` - The course being added
/// * `schedule` - The student's current courses
///
/// # Returns
/// The conflicting course, if any
pub fn find_conflict<'a>(course: &Course, schedule: &'a [Course]) -> Option<&'a Course> {
    let days = course.days();

    schedule
        .iter()
        .filter(|scheduled| days.intersects(scheduled.days()))
        .find(|scheduled| {
            course
                .times
                .iter()
                .any(|a| scheduled.times.iter().any(|b| a.conflicts_with(b)))
        })
}

/// Decides whether the student may add the course.
///
/// Checks run in a fixed order and the first failure wins: duplicate,
/// capacity, gender, then time conflicts against every scheduled course.
/// Nothing is mutated; committing an accepted enrollment is up to the caller.
pub fn validate(ctx: &EnrollmentContext) -> Verdict {
    let course = &ctx.course;

    let rejection = if ctx
        .schedule
        .iter()
        .any(|c| c.id == course.id && c.semester_id == course.semester_id)
    {
        Rejection::Duplicate
    } else if is_full(course, ctx.enrolled_count) {
        Rejection::Full
    } else if !course.gender.admits(ctx.student.gender) {
        Rejection::GenderMismatch
    } else if let Some(conflict) = find_conflict(course, &ctx.schedule) {
        Rejection::TimeConflict {
            course_name: conflict.name.clone(),
        }
    } else {
        return Verdict::Accepted;
    };

    debug!(
        "Student {} cannot take {} ({}): {rejection}",
        ctx.student.id, course.code, course.name
    );

    Verdict::Rejected(rejection)
}
