use enrollment::{
    context::{EnrollmentContext, SectionKey, Student},
    course::Course,
    gate::SectionGate,
    validator::validate,
    verdict::{Rejection, Verdict},
};
use models::gender::Gender;
use portal_scraper::extract::{ExtractOptions, extract_document};
use std::cell::Cell;
use uuid::Uuid;

const EXPORT: &str = r#"
<table class="CTable3">
  <tr><td>۱۰۱</td><td>ریاضی ۱</td><td>۳</td><td></td><td>۱</td><td></td><td></td><td>مختلط</td><td>علی رضایی</td>
      <td>درس(ت): دو شنبه ۰۹:۰۰-۱۰:۳۰ مکان: کلاس ۲</td><td>تاریخ: ۱۴۰۳/۱۰/۱۵ ساعت: ۰۹:۰۰-۱۱:۰۰</td></tr>
  <tr><td>۱۰۲</td><td>فیزیک ۱</td><td>۳</td><td></td><td>۲۰</td><td></td><td></td><td>مرد</td><td>حسن محمدی</td>
      <td>درس(ت): دوشنبه ۱۰:۰۰-۱۱:۰۰</td><td></td></tr>
  <tr><td>۱۰۳</td><td>شیمی</td><td>۳</td><td></td><td>۲۰</td><td></td><td></td><td>مختلط</td><td>مریم احمدی</td>
      <td>درس(ت): دوشنبه ۱۰:۳۰-۱۲:۰۰ درس(ت): چهار شنبه ۱۰:۳۰-۱۲:۰۰</td><td></td></tr>
</table>
"#;

/// Scrapes the export and registers every course in one semester
fn catalogue() -> Vec<Course> {
    let semester = Uuid::new_v4();
    extract_document(EXPORT, "12", &ExtractOptions::default())
        .unwrap()
        .iter()
        .map(|record| Course::register(record, Uuid::new_v4(), semester).unwrap())
        .collect()
}

fn context(course: &Course, gender: Gender, schedule: &[Course]) -> EnrollmentContext {
    EnrollmentContext {
        course: course.clone(),
        student: Student {
            id: Uuid::new_v4(),
            gender,
        },
        schedule: schedule.to_vec(),
        enrolled_count: 0,
    }
}

#[test]
fn test_scraped_courses_register() {
    let courses = catalogue();
    assert_eq!(courses.len(), 3);

    let math = &courses[0];
    assert_eq!(math.code, "101");
    assert_eq!(math.capacity, 1);
    assert_eq!(math.times.len(), 1);
    assert_eq!(math.times[0].token().as_str(), "d2/09:00-10:30");
    assert!(math.exam.is_some());
    assert_eq!(courses[2].times.len(), 2);
}

#[test]
fn test_scraped_schedule_conflicts() {
    let courses = catalogue();
    let (math, physics, chemistry) = (&courses[0], &courses[1], &courses[2]);

    // 09:00-10:30 overlaps 10:00-11:00 on Monday
    assert_eq!(
        validate(&context(physics, Gender::Male, std::slice::from_ref(math))),
        Verdict::Rejected(Rejection::TimeConflict {
            course_name: "ریاضی 1".to_string()
        })
    );

    // 09:00-10:30 and 10:30-12:00 only touch
    assert!(validate(&context(chemistry, Gender::Female, std::slice::from_ref(math))).is_accepted());

    // Physics is for male students only
    assert_eq!(
        validate(&context(physics, Gender::Female, &[])),
        Verdict::Rejected(Rejection::GenderMismatch)
    );
}

#[test]
fn test_gate_fills_scraped_section() {
    let courses = catalogue();
    let math = &courses[0];
    let gate = SectionGate::new();
    let enrolled = Cell::new(0);

    let enroll = |gender| {
        gate.admit::<_, _, ()>(
            SectionKey::of(math),
            || {
                let mut ctx = context(math, gender, &[]);
                ctx.enrolled_count = enrolled.get();
                Ok(ctx)
            },
            |_| {
                enrolled.set(enrolled.get() + 1);
                Ok(())
            },
        )
    };

    assert_eq!(enroll(Gender::Female), Ok(Verdict::Accepted));
    assert_eq!(enroll(Gender::Male), Ok(Verdict::Rejected(Rejection::Full)));
    assert_eq!(enrolled.get(), 1);
}
