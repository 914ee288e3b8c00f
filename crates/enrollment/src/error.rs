use models::error::CodecError;
use thiserror::Error;

/// Failures turning a scraped record into a registered course
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("invalid slot '{token}': {source}")]
    InvalidSlot {
        token: String,
        #[source]
        source: CodecError,
    },

    #[error("invalid professor name '{0}'")]
    InvalidProfessor(String),

    #[error("unknown gender restriction '{0}'")]
    UnknownGender(String),
}
