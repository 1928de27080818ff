//! Exit codes for the heredity CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//! Usage errors are reported by clap with its own status (2).

use hd_common::Error;

/// Exit codes for heredity runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Posteriors computed over the full hypothesis space
    Clean = 0,

    /// Deadline reached; posteriors cover part of the space
    Incomplete = 3,

    /// Configuration or model error
    ConfigError = 10,

    /// Malformed pedigree input
    DataError = 11,

    /// Inference error or invariant violation
    InferenceError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map a failed run to its exit code.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::InvalidModel(_) => ExitCode::ConfigError,
            e if e.is_data_error() => ExitCode::DataError,
            Error::InvariantViolation(_)
            | Error::PedigreeTooLarge { .. }
            | Error::ImpossibleEvidence
            | Error::DeadlineExceeded { .. } => ExitCode::InferenceError,
            Error::Io(_) => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
