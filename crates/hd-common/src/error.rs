//! Error types for heredity.

use thiserror::Error;

/// Result type alias for heredity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for heredity.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid probability model: {0}")]
    InvalidModel(String),

    // Pedigree data errors (20-29)
    #[error("record {row}: person name is empty")]
    EmptyName { row: usize },

    #[error("duplicate person {name:?}")]
    DuplicatePerson { name: String },

    #[error("{name} has only one parent recorded; mother and father must both be set or both be blank")]
    HalfParented { name: String },

    #[error("{person} names unknown parent {parent:?}")]
    UnknownParent { person: String, parent: String },

    #[error("{name} is listed as their own parent")]
    SelfParent { name: String },

    #[error("parent links form a cycle through {name}")]
    ParentCycle { name: String },

    #[error("{name} has invalid trait value {value:?} (expected 1, 0, or blank)")]
    InvalidTrait { name: String, value: String },

    #[error("malformed pedigree data: {0}")]
    Csv(String),

    // Inference errors (30-39)
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),

    #[error("pedigree has {people} people; exact enumeration is limited to {limit}")]
    PedigreeTooLarge { people: usize, limit: usize },

    #[error("observed evidence has zero probability under the model")]
    ImpossibleEvidence,

    #[error("deadline of {deadline_ms}ms reached before any hypothesis contributed probability mass")]
    DeadlineExceeded { deadline_ms: u64 },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidModel(_) => 11,
            Error::EmptyName { .. } => 20,
            Error::DuplicatePerson { .. } => 21,
            Error::HalfParented { .. } => 22,
            Error::UnknownParent { .. } => 23,
            Error::SelfParent { .. } => 24,
            Error::ParentCycle { .. } => 25,
            Error::InvalidTrait { .. } => 26,
            Error::Csv(_) => 27,
            Error::InvariantViolation(_) => 30,
            Error::PedigreeTooLarge { .. } => 31,
            Error::ImpossibleEvidence => 32,
            Error::DeadlineExceeded { .. } => 33,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// True for malformed or inconsistent pedigree input.
    ///
    /// These are raised by the loader before any inference work begins.
    pub fn is_data_error(&self) -> bool {
        (20..30).contains(&self.code())
    }

    /// True for errors that indicate a bug in hypothesis construction.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::InvariantViolation(_))
    }

    /// Shorthand for building an [`Error::InvariantViolation`].
    pub fn invariant(msg: impl Into<String>) -> Self {
        Error::InvariantViolation(msg.into())
    }
}
