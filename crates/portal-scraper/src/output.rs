use crate::{error::PipelineError, util::escape_sql};
use models::course_record::{CourseRecord, MAX_MEETINGS};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

/// File that accumulates every faculty's insert statement
pub const COMBINED_FILE: &str = "combined.sql";

/// Quotes a string column
fn quoted(value: &str) -> String {
    format!("'{}'", escape_sql(value))
}

/// Renders a numeric column, `NULL` when absent
fn numeric<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

/// Renders one record as a value tuple with a leading `NULL` id
fn sql_tuple(record: &CourseRecord) -> String {
    let mut columns = vec![
        "NULL".to_string(),
        quoted(&record.course_id),
        quoted(&record.name),
        numeric(record.weight),
        numeric(record.capacity),
        quoted(&record.gender),
        quoted(&record.professor),
        quoted(&record.faculty),
    ];

    columns.extend((0..MAX_MEETINGS).map(|i| {
        quoted(record.time(i).map(|t| t.as_str()).unwrap_or_default())
    }));

    let (exam_time, exam_date) = record
        .exam
        .map(|exam| (exam.time_text(), exam.date_text()))
        .unwrap_or_default();
    columns.push(quoted(&exam_time));
    columns.push(quoted(&exam_date));

    format!("({})", columns.join(","))
}

/// Builds a bulk insert statement for a faculty's records.
///
/// # Returns
/// `None` when there are no records
pub fn sql_insert(faculty: &str, records: &[CourseRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let tuples = records.iter().map(sql_tuple).collect::<Vec<_>>();

    Some(format!(
        "\nINSERT INTO {faculty} VALUES\n{};",
        tuples.join(",\n")
    ))
}

/// Writes `<faculty>.json` as a pretty-printed array
pub fn write_json(
    output_dir: &Path,
    faculty: &str,
    records: &[CourseRecord],
) -> Result<PathBuf, PipelineError> {
    let json = serde_json::to_string_pretty(records).map_err(|source| PipelineError::Json {
        faculty: faculty.to_owned(),
        source,
    })?;

    let path = output_dir.join(format!("{faculty}.json"));
    fs::write(&path, json).map_err(|source| PipelineError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Writes `<faculty>.sql`
pub fn write_sql(output_dir: &Path, faculty: &str, statement: &str) -> Result<PathBuf, PipelineError> {
    let path = output_dir.join(format!("{faculty}.sql"));
    fs::write(&path, statement).map_err(|source| PipelineError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Appends statements to the combined file, creating it if needed
pub fn append_combined<'a, I>(output_dir: &Path, statements: I) -> Result<usize, PipelineError>
where
    I: IntoIterator<Item = &'a str>,
{
    let path = output_dir.join(COMBINED_FILE);
    let write_error = |source| PipelineError::Write {
        path: path.clone(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(write_error)?;

    let mut appended = 0;
    for statement in statements {
        writeln!(file, "{statement}").map_err(write_error)?;
        appended += 1;
    }

    Ok(appended)
}
