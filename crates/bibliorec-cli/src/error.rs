//! Error types for bibliorec-cli

use bibliorec::BiblioError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Artifact directory missing
    #[error("Artifacts directory not found: {0}")]
    ArtifactsNotFound(PathBuf),

    /// Bad config file or flag value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Index too small for the requested result count
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Artifacts parsed but inconsistent or malformed
    #[error("Invalid artifacts: {0}")]
    InvalidArtifacts(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to render output
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::ArtifactsNotFound(_) => ExitCode::from(3),
            Self::InvalidConfig(_) => ExitCode::from(4),
            Self::InsufficientData(_) => ExitCode::from(5),
            Self::InvalidArtifacts(_) => ExitCode::from(6),
            Self::Io(_) => ExitCode::from(7),
            Self::Output(_) => ExitCode::from(8),
        }
    }
}

impl From<BiblioError> for CliError {
    fn from(e: BiblioError) -> Self {
        match e {
            BiblioError::Io(io) => Self::Io(io),
            BiblioError::InvalidConfig { .. } => Self::InvalidConfig(e.to_string()),
            BiblioError::InsufficientData { .. } => Self::InsufficientData(e.to_string()),
            BiblioError::NotFound { .. }
            | BiblioError::DimensionMismatch { .. }
            | BiblioError::DuplicateIdentity { .. }
            | BiblioError::IndexMismatch { .. }
            | BiblioError::Serialization(_) => Self::InvalidArtifacts(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Output(e.to_string())
    }
}
