use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrunError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Upstream returned {status} for {endpoint}")]
    UpstreamStatus { status: u16, endpoint: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PrunError {
    pub fn upstream(status: u16, endpoint: impl Into<String>) -> Self {
        PrunError::UpstreamStatus {
            status,
            endpoint: endpoint.into(),
        }
    }

    /// Upstream HTTP status carried by this error, if any.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            PrunError::UpstreamStatus { status, .. } => Some(*status),
            PrunError::ApiError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PrunError::ApiError(_) => ErrorCategory::Network,
            PrunError::UpstreamStatus { .. } => ErrorCategory::Upstream,
            PrunError::CsvError(_)
            | PrunError::SerializationError(_)
            | PrunError::ProcessingError { .. }
            | PrunError::ValidationError { .. } => ErrorCategory::Data,
            PrunError::IoError(_) => ErrorCategory::Storage,
            PrunError::ConfigError { .. }
            | PrunError::ConfigValidationError { .. }
            | PrunError::InvalidConfigValueError { .. }
            | PrunError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PrunError::ApiError(_) => "Could not reach the remote API".to_string(),
            PrunError::UpstreamStatus { status: 401, .. } => {
                "The remote API refused access (401 Unauthorized)".to_string()
            }
            PrunError::UpstreamStatus { status, .. } => {
                format!("The remote API answered with status {}", status)
            }
            PrunError::IoError(e) => format!("File operation failed: {}", e),
            PrunError::ConfigError { .. }
            | PrunError::ConfigValidationError { .. }
            | PrunError::InvalidConfigValueError { .. }
            | PrunError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            _ => format!("Processing failed: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PrunError::ApiError(_) => "Check the network connection and the configured base URL",
            PrunError::UpstreamStatus { status: 401, .. }
            | PrunError::UpstreamStatus { status: 403, .. } => {
                "Set a valid FIO API key (FIO_API_KEY or [fio].api_key)"
            }
            PrunError::UpstreamStatus { .. } => "The remote service may be down, try again later",
            PrunError::IoError(_) => "Check that the output directory exists and is writable",
            PrunError::ConfigError { .. }
            | PrunError::ConfigValidationError { .. }
            | PrunError::InvalidConfigValueError { .. }
            | PrunError::MissingConfigError { .. } => "Fix the settings file or command-line flags",
            _ => "Re-run with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, PrunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_exposed() {
        let err = PrunError::upstream(401, "https://rest.fnar.net/ship/ships/bob");
        assert_eq!(err.upstream_status(), Some(401));
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("API key"));
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = PrunError::MissingConfigError {
            field: "fio.base_url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("fio.base_url"));
    }
}
