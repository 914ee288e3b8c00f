use lazy_static::lazy_static;
use regex::Regex;
use std::{fs, io, path::Path};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapses whitespace runs to a single space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Ensures a directory exists, creating it if necessary
///
/// # Arguments
/// * `dir_path` - Path to the directory
///
/// # Returns
/// Result indicating success or the I/O error
pub fn ensure_dir(dir_path: &Path) -> io::Result<()> {
    if !dir_path.exists() {
        fs::create_dir_all(dir_path)?;
    }

    Ok(())
}

/// Doubles single quotes for use inside a SQL string literal
pub fn escape_sql(value: &str) -> String {
    value.replace('\'', "''")
}
