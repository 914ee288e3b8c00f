use crate::{
    encode::{encode_cell, split_exam_segment},
    error::ExtractError,
    util::collapse_whitespace,
};
use lazy_static::lazy_static;
use log::{debug, warn};
use models::{
    course_record::CourseRecord,
    course_time::SlotToken,
    error::CodecError,
    exam::ExamWindow,
    normalize::normalize_digits,
};
use scraper::{ElementRef, Html, Selector};

/// Level label marking a graduate section
const GRADUATE_LABEL: &str = "ارشد";
/// Suffix appended to the name of a graduate section
const GRADUATE_SUFFIX: &str = " (ارشد)";
/// Class of the portal's course tables
const COURSE_TABLE_CLASS: &str = "CTable3";
/// Class of the portal's header rows
const TITLE_ROW_CLASS: &str = "DTitle";

lazy_static! {
    static ref COURSE_TABLE: Selector = Selector::parse("table.CTable3").unwrap();
    static ref ANY_TABLE: Selector = Selector::parse("table").unwrap();
    static ref ROW: Selector = Selector::parse("tr").unwrap();
    static ref CELL: Selector = Selector::parse("td").unwrap();
}

/// Column offsets of one course row in the portal export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub min_cells: usize,
    pub course_id: usize,
    pub name: usize,
    pub weight: usize,
    pub capacity: usize,
    pub gender: usize,
    pub professor: usize,
    pub meetings: usize,
    pub exam: usize,
    pub level: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            min_cells: 8,
            course_id: 0,
            name: 1,
            weight: 2,
            capacity: 4,
            gender: 7,
            professor: 8,
            meetings: 9,
            exam: 10,
            level: 15,
        }
    }
}

/// How extraction treats cells the codec rejects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub layout: ColumnLayout,
    /// Fail the row instead of dropping the offending field
    pub strict: bool,
}

/// Text of one table row, before any interpretation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalRow {
    /// The portal hides the row or uses it as a header
    pub hidden: bool,
    pub cells: Vec<String>,
}

impl PortalRow {
    /// Reads a `<tr>` element
    pub fn from_element(row: ElementRef) -> Self {
        let element = row.value();

        let hidden_style = element
            .attr("style")
            .map(|style| style.split_whitespace().collect::<String>())
            .is_some_and(|style| style.contains("display:none"));
        let title_row = element.classes().any(|class| class == TITLE_ROW_CLASS);

        let cells = row
            .select(&CELL)
            .map(|cell| cell.text().collect::<Vec<_>>().join(" "))
            .collect();

        Self {
            hidden: hidden_style || title_row,
            cells,
        }
    }

    /// Cell text at `index`, empty if the row is shorter
    fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Normalised, single-spaced text of the cell at `index`
    fn text(&self, index: usize) -> String {
        collapse_whitespace(&normalize_digits(self.cell(index)))
    }
}

/// Handles a codec failure on one field: logs and drops it, or fails the
/// row in strict mode.
fn tolerate<T>(
    result: Result<T, CodecError>,
    course_id: &str,
    strict: bool,
) -> Result<Option<T>, ExtractError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(source) if strict => Err(ExtractError::Codec {
            course_id: course_id.to_owned(),
            source,
        }),
        Err(e) => {
            warn!("Dropping field of course {course_id}: {e}");
            Ok(None)
        }
    }
}

/// Parses a numeric column, logging values that are not numbers
fn parse_number<T: std::str::FromStr>(text: &str, column: &str, course_id: &str) -> Option<T> {
    if text.is_empty() {
        return None;
    }

    let parsed = text.parse().ok();
    if parsed.is_none() {
        warn!("Course {course_id} has a non-numeric {column}: '{text}'");
    }
    parsed
}

/// Turns one table row into a course record.
///
/// # Arguments
/// * `row` - The row's cell text
/// * `faculty` - Faculty code of the export the row came from
/// * `options` - Column layout and strictness
///
/// # Returns
/// `Ok(None)` for hidden rows and rows with too few cells
pub fn extract_row(
    row: &PortalRow,
    faculty: &str,
    options: &ExtractOptions,
) -> Result<Option<CourseRecord>, ExtractError> {
    let layout = &options.layout;

    if row.hidden || row.cells.len() < layout.min_cells {
        debug!(
            "Skipping row with {} cells (hidden: {})",
            row.cells.len(),
            row.hidden
        );
        return Ok(None);
    }

    let course_id = row.text(layout.course_id);

    let mut name = row.text(layout.name);
    if row.text(layout.level) == GRADUATE_LABEL {
        name.push_str(GRADUATE_SUFFIX);
    }

    let encoded = encode_cell(
        &normalize_digits(row.cell(layout.meetings)),
        &normalize_digits(row.cell(layout.exam)),
    );

    let mut times = Vec::with_capacity(encoded.meetings.len());
    for candidate in encoded.meetings {
        let token = SlotToken::from(candidate);
        if token.is_empty() {
            continue;
        }

        if tolerate(token.decode(), &course_id, options.strict)?.is_some() {
            times.push(token);
        }
    }

    let exam = match encoded.exam.as_deref() {
        Some(segment) => {
            let window = split_exam_segment(segment)
                .and_then(|(date, range)| ExamWindow::parse(&date, &range));
            tolerate(window, &course_id, options.strict)?
        }
        None => None,
    };

    Ok(Some(CourseRecord {
        weight: parse_number(&row.text(layout.weight), "weight", &course_id),
        capacity: parse_number(&row.text(layout.capacity), "capacity", &course_id),
        gender: row.text(layout.gender),
        professor: row.text(layout.professor),
        faculty: faculty.to_owned(),
        course_id,
        name,
        times,
        exam,
    }))
}

/// Extracts every course row of a portal export.
///
/// Rows are read from the portal's course tables, or from every table when
/// the document has none.
///
/// # Errors
/// Only in strict mode, on the first row with a field the codec rejects
pub fn extract_document(
    html: &str,
    faculty: &str,
    options: &ExtractOptions,
) -> Result<Vec<CourseRecord>, ExtractError> {
    let document = Html::parse_document(html);

    let mut tables = document.select(&COURSE_TABLE).peekable();
    let tables: Vec<ElementRef> = if tables.peek().is_some() {
        tables.collect()
    } else {
        debug!("No .{COURSE_TABLE_CLASS} table in {faculty}, reading all tables");
        document.select(&ANY_TABLE).collect()
    };

    let mut records = Vec::new();
    for table in tables {
        for row in table.select(&ROW) {
            if let Some(record) = extract_row(&PortalRow::from_element(row), faculty, options)? {
                records.push(record);
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(cells: &[&str]) -> PortalRow {
        PortalRow {
            hidden: false,
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn sample_cells() -> Vec<&'static str> {
        vec![
            "۱۲۱۴۰۱۲_۰۱",
            "رياضي  عمومي ۱",
            "۳",
            "۰",
            "۴۰",
            "",
            "",
            "مختلط",
            "علي رضايي",
            "درس(ت): دو شنبه ۰۸:۰۰-۰۹:۳۰ مکان: ساختمان ۲",
            "تاريخ: ۱۴۰۳/۱۰/۱۵ ساعت: ۰۹:۰۰-۱۱:۰۰",
        ]
    }

    #[test]
    fn test_extract_row_end_to_end() {
        let record = extract_row(&row(&sample_cells()), "12", &ExtractOptions::default())
            .unwrap()
            .unwrap();

        assert_eq!(record.course_id, "1214012_01");
        assert_eq!(record.name, "ریاضی عمومی 1");
        assert_eq!(record.weight, Some(3));
        assert_eq!(record.capacity, Some(40));
        assert_eq!(record.gender, "مختلط");
        assert_eq!(record.professor, "علی رضایی");
        assert_eq!(record.faculty, "12");
        assert_eq!(record.times, vec![SlotToken::from("d2/08:00-09:30")]);

        let day = NaiveDate::from_ymd_opt(1403, 10, 15).unwrap();
        let exam = record.exam.unwrap();
        assert_eq!(exam.start, day.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(exam.end, day.and_hms_opt(11, 0, 0).unwrap());
    }

    #[test]
    fn test_graduate_suffix() {
        let mut cells = sample_cells();
        cells.resize(16, "");
        cells[15] = "ارشد";

        let record = extract_row(&row(&cells), "12", &ExtractOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(record.name, "ریاضی عمومی 1 (ارشد)");
    }

    #[test]
    fn test_skips_short_and_hidden_rows() {
        let options = ExtractOptions::default();
        assert_eq!(extract_row(&row(&["a", "b", "c"]), "12", &options), Ok(None));

        let mut hidden = row(&sample_cells());
        hidden.hidden = true;
        assert_eq!(extract_row(&hidden, "12", &options), Ok(None));
    }

    #[test]
    fn test_bad_slot_dropped_or_fatal() {
        let mut cells = sample_cells();
        cells[9] = "درس(ت): دوشنبه ۱۰:۰۰-۰۹:۰۰ درس(ت): سه شنبه ۰۸:۰۰-۰۹:۰۰";

        let lenient = extract_row(&row(&cells), "12", &ExtractOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(lenient.times, vec![SlotToken::from("d3/08:00-09:00")]);

        let strict = ExtractOptions {
            strict: true,
            ..Default::default()
        };
        assert!(matches!(
            extract_row(&row(&cells), "12", &strict),
            Err(ExtractError::Codec {
                source: CodecError::EndBeforeStart(_),
                ..
            })
        ));
    }

    #[test]
    fn test_bad_exam_dropped() {
        let mut cells = sample_cells();
        cells[10] = "تاريخ: ۱۴۰۳/۱۰/۱۵ ساعت: ۱۱:۰۰-۰۹:۰۰";

        let record = extract_row(&row(&cells), "12", &ExtractOptions::default())
            .unwrap()
            .unwrap();
        assert!(record.exam.is_none());
        assert_eq!(record.times.len(), 1);
    }

    #[test]
    fn test_exam_without_hour_dropped_or_fatal() {
        let mut cells = sample_cells();
        cells[9] = "درس(ت): شنبه 08:00-10:00";
        cells[10] = "تاريخ: ۱۴۰۳/۱۰/۱۵";

        let lenient = extract_row(&row(&cells), "12", &ExtractOptions::default())
            .unwrap()
            .unwrap();
        assert!(lenient.exam.is_none());
        assert_eq!(lenient.times, vec![SlotToken::from("d0/08:00-10:00")]);

        let strict = ExtractOptions {
            strict: true,
            ..Default::default()
        };
        assert!(matches!(
            extract_row(&row(&cells), "12", &strict),
            Err(ExtractError::Codec {
                source: CodecError::InvalidExamWindow(_),
                ..
            })
        ));
    }

    #[test]
    fn test_non_numeric_capacity() {
        let mut cells = sample_cells();
        cells[4] = "نامحدود";

        let record = extract_row(&row(&cells), "12", &ExtractOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(record.capacity, None);
    }

    #[test]
    fn test_extract_document() {
        let html = r#"
            <html><body>
            <table class="CTable3">
              <tr class="DTitle"><td>کد</td><td>نام</td><td>واحد</td><td></td><td>ظرفیت</td><td></td><td></td><td>جنسیت</td><td>استاد</td><td>زمان</td><td>امتحان</td></tr>
              <tr><td>۱۱۱</td><td>فیزیک</td><td>۳</td><td></td><td>۳۰</td><td></td><td></td><td>مرد</td><td>حسن</td><td>درس(ت): شنبه ۱۰:۰۰-۱۲:۰۰<br>درس(ت): دوشنبه ۱۰:۰۰-۱۲:۰۰</td><td>تاريخ: ۱۴۰۳.۱۰.۲۰ ساعت: ۰۸:۰۰-۱۰:۰۰</td></tr>
              <tr style="display: none;"><td>۲۲۲</td><td>شیمی</td><td>۳</td><td></td><td>۳۰</td><td></td><td></td><td>زن</td><td>مریم</td><td></td><td></td></tr>
              <tr><td>۳۳۳</td><td>ناقص</td></tr>
            </table>
            </body></html>
        "#;

        let records = extract_document(html, "21", &ExtractOptions::default()).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.course_id, "111");
        assert_eq!(record.faculty, "21");
        assert_eq!(
            record.times,
            vec![
                SlotToken::from("d0/10:00-12:00"),
                SlotToken::from("d2/10:00-12:00")
            ]
        );
        assert_eq!(record.exam.map(|e| e.date_text()), Some("1403/10/20".to_string()));
    }

    #[test]
    fn test_extract_document_without_course_table_class() {
        let html = "<table><tr><td>۴۴۴</td><td>آمار</td><td>۲</td><td></td><td>۲۵</td><td></td><td></td><td>مختلط</td><td>رضا</td></tr></table>";

        let records = extract_document(html, "30", &ExtractOptions::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].times.is_empty());
        assert!(records[0].exam.is_none());
    }
}
