use log::error;
use portal_scraper::{config::ScraperConfig, pipeline};
use std::{env, process};

/// Converts every portal export in the input directory into JSON and SQL
///
/// Usage: `scrape [INPUT_DIR] [OUTPUT_DIR]`
fn main() {
    env_logger::init();

    let config = ScraperConfig::from_env().with_args(env::args().skip(1));

    if let Err(e) = pipeline::run(&config) {
        error!("{e}");
        process::exit(1);
    }
}
