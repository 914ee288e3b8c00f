use crate::{
    config::ScraperConfig,
    error::PipelineError,
    extract::{ExtractOptions, extract_document},
    output::{append_combined, sql_insert, write_json, write_sql},
    util::ensure_dir,
};
use log::{error, info, warn};
use models::course_record::CourseRecord;
use rayon::{
    ThreadPoolBuilder,
    iter::{IntoParallelRefIterator, ParallelIterator},
};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Extension of portal export files
const HTML_EXTENSION: &str = "html";

/// What one run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_found: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub records: usize,
}

/// Result of processing a single export
#[derive(Debug)]
struct FacultyOutput {
    faculty: String,
    records: usize,
    statement: Option<String>,
}

/// Lists the `*.html` files of a directory, sorted by name
///
/// # Errors
/// If the directory itself cannot be read
pub fn list_exports(input_dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let read_error = |source| PipelineError::Read {
        path: input_dir.to_path_buf(),
        source,
    };

    let mut files = fs::read_dir(input_dir)
        .map_err(read_error)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == HTML_EXTENSION)
        })
        .collect::<Vec<_>>();

    files.sort();
    Ok(files)
}

/// Faculty code of an export, i.e. its file stem
pub fn faculty_code(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parses one export and returns its records
pub fn process_file(
    path: &Path,
    options: &ExtractOptions,
) -> Result<Vec<CourseRecord>, PipelineError> {
    let bytes = fs::read(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let html = String::from_utf8_lossy(&bytes);

    Ok(extract_document(&html, &faculty_code(path), options)?)
}

/// Processes one export end to end, writing its JSON and SQL files.
///
/// Output-file failures are logged; only a failure to read or extract the
/// export makes the file count as skipped.
fn run_file(path: &Path, output_dir: &Path, options: &ExtractOptions) -> Option<FacultyOutput> {
    let faculty = faculty_code(path);

    let records = match process_file(path, options) {
        Ok(records) => records,
        Err(e) => {
            warn!("Skipping {}: {e}", path.display());
            return None;
        }
    };

    if let Err(e) = write_json(output_dir, &faculty, &records) {
        error!("Error generating JSON for {faculty}: {e}");
    }

    let statement = sql_insert(&faculty, &records);
    if let Some(statement) = &statement {
        if let Err(e) = write_sql(output_dir, &faculty, statement) {
            error!("Error writing SQL file for {faculty}: {e}");
        }
    }

    info!("Finished: {faculty} ({} courses)", records.len());

    Some(FacultyOutput {
        faculty,
        records: records.len(),
        statement,
    })
}

/// Runs the batch: every export in the input directory, one task per file.
///
/// A file that cannot be read or parsed is logged and skipped. The
/// combined file is appended to by this thread only, in file-name order.
///
/// # Errors
/// If the input directory cannot be listed, the output directory cannot be
/// created, the worker pool cannot be built, or `combined.sql` cannot be
/// written
pub fn run(config: &ScraperConfig) -> Result<RunSummary, PipelineError> {
    let files = list_exports(&config.input_dir)?;
    ensure_dir(&config.output_dir).map_err(|source| PipelineError::Write {
        path: config.output_dir.clone(),
        source,
    })?;

    info!(
        "Processing {} exports from {}",
        files.len(),
        config.input_dir.display()
    );

    let mut pool = ThreadPoolBuilder::new();
    if let Some(threads) = config.threads {
        pool = pool.num_threads(threads);
    }
    let pool = pool.build()?;

    let options = config.extract_options();
    let outputs = pool.install(|| {
        files
            .par_iter()
            .map(|path| run_file(path, &config.output_dir, &options))
            .collect::<Vec<_>>()
    });

    let processed = outputs.iter().flatten().collect::<Vec<_>>();
    append_combined(
        &config.output_dir,
        processed.iter().filter_map(|output| output.statement.as_deref()),
    )?;

    let summary = RunSummary {
        files_found: files.len(),
        files_processed: processed.len(),
        files_skipped: files.len() - processed.len(),
        records: processed.iter().map(|output| output.records).sum(),
    };

    for output in processed.iter().filter(|output| output.records == 0) {
        warn!("No courses found for faculty {}", output.faculty);
    }

    info!(
        "Processed {}/{} exports, {} courses",
        summary.files_processed, summary.files_found, summary.records
    );

    Ok(summary)
}
