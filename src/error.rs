use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open output file {path}: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Operation was cancelled by user")]
    Cancelled,

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExportError {
    fn user_message(&self) -> String {
        match self {
            ExportError::Validation { message } => {
                format!("Validation failed: {}", message)
            }
            ExportError::Io(source) => {
                format!("IO operation failed: {}", source)
            }
            ExportError::OutputOpen { path, source } => {
                format!("Cannot open output file {}: {}", path.display(), source)
            }
            ExportError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ExportError::Cancelled => "Export was cancelled by user".to_string(),
            ExportError::Unexpected { message } => {
                format!("Unexpected error: {}", message)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExportError::Validation { .. } => Some(
                "Check that the source directory exists and that at least one file suffix is configured (e.g., --suffixes .rs,.toml).".to_string()
            ),
            ExportError::OutputOpen { .. } => Some(
                "Ensure the output file's parent directory is writable, or pick a different location with --output.".to_string()
            ),
            ExportError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ExportError {
    fn from(error: toml::de::Error) -> Self {
        ExportError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
