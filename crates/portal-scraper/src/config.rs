use crate::extract::{ColumnLayout, ExtractOptions};
use log::warn;
use std::{env, path::PathBuf};

/// Default directory of portal exports
pub const DEFAULT_INPUT_DIR: &str = "./courses";
/// Default directory for generated files
pub const DEFAULT_OUTPUT_DIR: &str = "./export";

/// Settings for one scraper run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Worker threads; `None` uses one per core
    pub threads: Option<usize>,
    pub strict: bool,
    pub layout: ColumnLayout,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            threads: None,
            strict: false,
            layout: ColumnLayout::default(),
        }
    }
}

/// Reads a boolean flag such as `1`, `true` or `yes`
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl ScraperConfig {
    /// Builds a config from `SCRAPER_*` variables, loading `.env` if present
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds a config from any variable source
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let threads = var("SCRAPER_THREADS").and_then(|value| match value.trim().parse() {
            Ok(0) | Err(_) => {
                warn!("Ignoring invalid SCRAPER_THREADS value '{value}'");
                None
            }
            Ok(n) => Some(n),
        });

        Self {
            input_dir: var("SCRAPER_INPUT_DIR").map_or(defaults.input_dir, PathBuf::from),
            output_dir: var("SCRAPER_OUTPUT_DIR").map_or(defaults.output_dir, PathBuf::from),
            threads,
            strict: var("SCRAPER_STRICT").is_some_and(|value| parse_flag(&value)),
            layout: defaults.layout,
        }
    }

    /// Overrides the directories with positional `[INPUT_DIR] [OUTPUT_DIR]`
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        if let Some(input) = args.next() {
            self.input_dir = PathBuf::from(input);
        }
        if let Some(output) = args.next() {
            self.output_dir = PathBuf::from(output);
        }
        self
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            layout: self.layout,
            strict: self.strict,
        }
    }
}
