use models::error::CodecError;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Strict-mode failure while extracting a row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("course {course_id}: {source}")]
    Codec {
        course_id: String,
        #[source]
        source: CodecError,
    },
}

/// Failures at the file boundary of the batch pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize records for faculty {faculty}: {source}")]
    Json {
        faculty: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
