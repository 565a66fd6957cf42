use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("no saved session for user {0}")]
    UnknownUser(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raised per family during community analysis; the scan skips the record
/// and keeps going.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("family {surname} has no {section} section")]
    MissingSection {
        surname: String,
        section: &'static str,
    },
}
