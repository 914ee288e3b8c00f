pub mod course_record;
pub mod course_time;
pub mod days;
pub mod error;
pub mod exam;
pub mod gender;
pub mod normalize;
