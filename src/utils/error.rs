use crate::domain::model::MessageKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Failed to send {kind}: {reason}")]
    EmailDispatchError { kind: MessageKind, reason: String },

    #[error("Email provider rejected the request ({status}): {message}")]
    ProviderError { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Email dispatch timed out after {seconds}s")]
    TimeoutError { seconds: u64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IntakeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Dispatch,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        IntakeError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::ValidationError { .. } => ErrorCategory::Validation,
            IntakeError::EmailDispatchError { .. }
            | IntakeError::ProviderError { .. }
            | IntakeError::HttpError(_)
            | IntakeError::TimeoutError { .. } => ErrorCategory::Dispatch,
            IntakeError::ConfigError { .. }
            | IntakeError::MissingConfigError { .. }
            | IntakeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            IntakeError::IoError(_) | IntakeError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Dispatch => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Transient provider failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            IntakeError::HttpError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            IntakeError::ProviderError { status, .. } => *status == 429 || *status >= 500,
            IntakeError::TimeoutError { .. } => true,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IntakeError::ValidationError { message, .. } => message.clone(),
            IntakeError::EmailDispatchError { kind, .. } => {
                format!("We could not deliver the {}.", kind)
            }
            IntakeError::ProviderError { .. } | IntakeError::HttpError(_) => {
                "The email provider could not be reached.".to_string()
            }
            IntakeError::TimeoutError { .. } => "Sending took too long and was abandoned.".to_string(),
            IntakeError::ConfigError { .. }
            | IntakeError::MissingConfigError { .. }
            | IntakeError::InvalidConfigValueError { .. } => {
                format!("The intake configuration is invalid: {}", self)
            }
            IntakeError::IoError(_) | IntakeError::SerializationError(_) => {
                format!("Unexpected system error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Fill in the highlighted fields and try again",
            ErrorCategory::Dispatch => {
                "Retry the submission, or check the provider API key and sender domain"
            }
            ErrorCategory::Configuration => {
                "Check the config file and the RESEND_API_KEY environment variable"
            }
            ErrorCategory::System => "Check file permissions and the input payload format",
        }
    }
}
