use crate::error::RegistrationError;
use models::{
    course_record::CourseRecord, course_time::CourseTime, days::DaySet, exam::ExamWindow,
    gender::GenderRestriction, normalize::normalize_name,
};
use uuid::Uuid;

/// A registered course section with its decoded meeting times
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    pub id: Uuid,
    pub semester_id: Uuid,
    pub code: String,
    pub name: String,
    pub weight: Option<u32>,
    /// Seats offered; zero or less admits nobody
    pub capacity: i32,
    pub gender: GenderRestriction,
    pub professor: String,
    /// De-duplication key derived from the professor's name
    pub professor_key: String,
    pub faculty: String,
    pub times: Vec<CourseTime>,
    pub exam: Option<ExamWindow>,
}

impl Course {
    /// Registers a scraped record as a course of a semester.
    ///
    /// # Arguments
    /// * `record` - The scraped record
    /// * `id` - Identifier to give the course
    /// * `semester_id` - Semester the course is offered in
    ///
    /// # Returns
    /// The course, or the first field that could not be decoded. A record
    /// without a known capacity is registered with a capacity of zero.
    pub fn register(
        record: &CourseRecord,
        id: Uuid,
        semester_id: Uuid,
    ) -> Result<Self, RegistrationError> {
        let professor_key = normalize_name(&record.professor);
        if professor_key.is_empty() {
            return Err(RegistrationError::InvalidProfessor(record.professor.clone()));
        }

        let gender = record
            .gender
            .parse::<GenderRestriction>()
            .map_err(|_| RegistrationError::UnknownGender(record.gender.clone()))?;

        let times = record
            .times
            .iter()
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.decode().map_err(|source| RegistrationError::InvalidSlot {
                    token: token.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            semester_id,
            code: record.course_id.trim().to_owned(),
            name: record.name.trim().to_owned(),
            weight: record.weight,
            capacity: record.capacity.unwrap_or(0),
            gender,
            professor: record.professor.trim().to_owned(),
            professor_key,
            faculty: record.faculty.trim().to_owned(),
            times,
            exam: record.exam,
        })
    }

    /// Days of the week the course meets on
    pub fn days(&self) -> DaySet {
        self.times.iter().map(|time| time.day).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{course_time::SlotToken, days::Weekday, error::CodecError};

    fn record() -> CourseRecord {
        CourseRecord {
            course_id: " 1214012_01 ".to_string(),
            name: "ریاضی عمومی 1".to_string(),
            weight: Some(3),
            capacity: Some(40),
            gender: "مختلط".to_string(),
            professor: "  علي   رضايي ".to_string(),
            faculty: "12".to_string(),
            times: vec![
                SlotToken::from("d0/08:00-10:00"),
                SlotToken::default(),
                SlotToken::from("d2/08:00-10:00"),
            ],
            exam: None,
        }
    }

    #[test]
    fn test_register() {
        let id = Uuid::new_v4();
        let semester = Uuid::new_v4();
        let course = Course::register(&record(), id, semester).unwrap();

        assert_eq!(course.id, id);
        assert_eq!(course.semester_id, semester);
        assert_eq!(course.code, "1214012_01");
        assert_eq!(course.capacity, 40);
        assert_eq!(course.gender, GenderRestriction::Mixed);
        assert_eq!(course.professor_key, "علی رضایی");
        assert_eq!(course.times.len(), 2);
        assert_eq!(course.times[1].day, Weekday::Monday);
        assert!(course.days().contains(Weekday::Saturday));
        assert!(!course.days().contains(Weekday::Sunday));
    }

    #[test]
    fn test_register_reports_offending_token() {
        let mut record = record();
        record.times.push(SlotToken::from("d7/09:00-10:00"));

        match Course::register(&record, Uuid::nil(), Uuid::nil()) {
            Err(RegistrationError::InvalidSlot { token, source }) => {
                assert_eq!(token, "d7/09:00-10:00");
                assert!(matches!(source, CodecError::InvalidDay(_)));
            }
            other => panic!("expected InvalidSlot, got {other:?}"),
        }
    }

    #[test]
    fn test_register_rejects_blank_professor() {
        let record = CourseRecord {
            professor: " \u{200C} ".to_string(),
            ..record()
        };
        assert!(matches!(
            Course::register(&record, Uuid::nil(), Uuid::nil()),
            Err(RegistrationError::InvalidProfessor(_))
        ));
    }

    #[test]
    fn test_register_gender_labels() {
        for (label, expected) in [
            ("male", GenderRestriction::Male),
            ("زن", GenderRestriction::Female),
            ("Mixed", GenderRestriction::Mixed),
        ] {
            let record = CourseRecord {
                gender: label.to_string(),
                ..record()
            };
            let course = Course::register(&record, Uuid::nil(), Uuid::nil()).unwrap();
            assert_eq!(course.gender, expected, "label: {label}");
        }

        let record = CourseRecord {
            gender: "any".to_string(),
            ..record()
        };
        assert_eq!(
            Course::register(&record, Uuid::nil(), Uuid::nil()),
            Err(RegistrationError::UnknownGender("any".to_string()))
        );
    }

    #[test]
    fn test_unknown_capacity_admits_nobody() {
        let record = CourseRecord {
            capacity: None,
            ..record()
        };
        let course = Course::register(&record, Uuid::nil(), Uuid::nil()).unwrap();
        assert_eq!(course.capacity, 0);
    }
}
