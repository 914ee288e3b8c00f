//! Course registration and the enrollment rules applied when a student adds
//! a course to their semester schedule.

pub mod context;
pub mod course;
pub mod error;
pub mod gate;
pub mod validator;
pub mod verdict;
