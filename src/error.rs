use thiserror::Error;

#[derive(Error, Debug)]
pub enum MiningError {
    #[error("Malformed input: {message}")]
    MalformedInput { message: String, tid: Option<usize> },
    #[error("Invalid constraint `{field}`: {message}")]
    InvalidConstraint { field: &'static str, message: String },
    #[error("Internal invariant violated: {0}")]
    Computation(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MiningError>;

// Helper conversions
impl From<config::ConfigError> for MiningError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}

impl MiningError {
    pub(crate) fn malformed(message: impl Into<String>, tid: Option<usize>) -> Self {
        Self::MalformedInput { message: message.into(), tid }
    }
    pub(crate) fn constraint(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConstraint { field, message: message.into() }
    }
}
