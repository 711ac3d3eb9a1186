use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid input: {message}")]
    InputError { message: String },

    #[error("Card not found: {name}")]
    CardNotFound { name: String },

    #[error("{service} unavailable: {message}")]
    TransientError { service: String, message: String },

    #[error("Validation cancelled")]
    Cancelled,

    #[error("Validation exceeded its {deadline:?} deadline")]
    DeadlineExceeded { deadline: std::time::Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Resolution,
    External,
    Configuration,
    Cancellation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AssistError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputError {
            message: message.into(),
        }
    }

    pub fn transient(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransientError {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputError { .. } => ErrorCategory::Input,
            Self::CardNotFound { .. } => ErrorCategory::Resolution,
            Self::ApiError(_) | Self::TransientError { .. } => ErrorCategory::External,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::Cancelled | Self::DeadlineExceeded { .. } => ErrorCategory::Cancellation,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Cancelled => ErrorSeverity::Low,
            Self::TransientError { .. } | Self::DeadlineExceeded { .. } | Self::ApiError(_) => {
                ErrorSeverity::Medium
            }
            Self::InputError { .. }
            | Self::CardNotFound { .. }
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 呼叫端可直接重試的錯誤 (引擎本身不重試)
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TransientError { .. } | Self::DeadlineExceeded { .. } => true,
            Self::ApiError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Provide a commander name and a decklist with at least one card (JSON array or one card per line)"
            }
            ErrorCategory::Resolution => "Check the card name spelling; fuzzy matching needs a recognizable name",
            ErrorCategory::External => "The card data service is unavailable, try again in a moment",
            ErrorCategory::Configuration => "Review the configuration file and command-line overrides",
            ErrorCategory::Cancellation => {
                "Run the validation again, or raise validation.deadline_seconds for large decklists"
            }
            ErrorCategory::System => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::CardNotFound { name } => format!("Could not find a card named '{}'", name),
            Self::InputError { message } => message.clone(),
            Self::TransientError { service, .. } => {
                format!("{} is temporarily unavailable", service)
            }
            Self::Cancelled => "Validation was cancelled".to_string(),
            Self::DeadlineExceeded { deadline } => {
                format!("Validation did not finish within {:?}", deadline)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistError>;
