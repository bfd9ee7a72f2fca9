use std::io;

use thiserror::Error;

/// Failure tier used when reporting an error across the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTier {
    /// Missing or invalid input, detected before any expensive work.
    Input,
    /// Any other failure.
    Internal,
}

/// Library-wide error type for costdraft operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// No uploaded file survived the PDF filter.
    #[error("No valid PDF files uploaded")]
    NoValidDocuments,

    /// The `data` field was absent or empty.
    #[error("No JSON data provided")]
    MissingPayload,

    /// The `data` field was not valid JSON.
    #[error("Invalid JSON data: {0}")]
    InvalidPayload(String),

    /// The payload parsed but did not have the expected shape.
    #[error("Malformed {what}: {details}")]
    MalformedPayload { what: String, details: String },

    /// The historical reference dataset could not be read or parsed.
    #[error("Historical dataset error ({source_name}): {details}")]
    HistoricalDataset { source_name: String, details: String },

    /// Prompt template lookup or rendering failed.
    #[error("Prompt assembly failed: {0}")]
    PromptAssembly(#[from] crate::domain::prompt::PromptError),

    /// Completion endpoint call failed.
    #[error("Completion API error: {message}")]
    CompletionApi { message: String, status: Option<u16> },

    /// The upload request could not be read.
    #[error("Upload error: {0}")]
    Upload(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn malformed<W: Into<String>, D: ToString>(what: W, details: D) -> Self {
        AppError::MalformedPayload { what: what.into(), details: details.to_string() }
    }

    /// Classify the error into the two reporting tiers.
    pub fn tier(&self) -> ErrorTier {
        match self {
            AppError::NoValidDocuments
            | AppError::MissingPayload
            | AppError::InvalidPayload(_)
            | AppError::Upload(_) => ErrorTier::Input,
            AppError::Io(_)
            | AppError::Configuration(_)
            | AppError::EnvironmentVariableMissing(_)
            | AppError::TomlParseError(_)
            | AppError::MalformedPayload { .. }
            | AppError::HistoricalDataset { .. }
            | AppError::PromptAssembly(_)
            | AppError::CompletionApi { .. } => ErrorTier::Internal,
        }
    }

    /// HTTP status code for the error's tier.
    pub fn status_code(&self) -> u16 {
        match self.tier() {
            ErrorTier::Input => 400,
            ErrorTier::Internal => 500,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.tier() {
            ErrorTier::Input => 2,
            ErrorTier::Internal => 1,
        }
    }
}
