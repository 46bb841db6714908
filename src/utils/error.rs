use thiserror::Error;

#[derive(Error, Debug)]
pub enum MccError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No HTTP client bound for tag '{tag}'")]
    MissingBinding { tag: &'static str },

    #[error("HTTP client for tag '{tag}' is already bound")]
    DuplicateBinding { tag: &'static str },

    #[error("Upstream '{client}' returned HTTP {status} for {url}")]
    UpstreamStatus {
        client: &'static str,
        status: u16,
        url: String,
    },

    #[error("Unknown day part: {value}")]
    UnknownDayPart { value: String },

    #[error("Invalid time of day: {value}")]
    InvalidTimeOfDay { value: String },
}

pub type Result<T> = std::result::Result<T, MccError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Wiring,
    Upstream,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MccError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MccError::ConfigValidationError { .. }
            | MccError::InvalidConfigValueError { .. }
            | MccError::MissingConfigError { .. }
            | MccError::UrlParse(_) => ErrorCategory::Configuration,
            MccError::MissingBinding { .. } | MccError::DuplicateBinding { .. } => {
                ErrorCategory::Wiring
            }
            MccError::Http(_)
            | MccError::UpstreamStatus { .. }
            | MccError::SerializationError(_) => ErrorCategory::Upstream,
            MccError::UnknownDayPart { .. } | MccError::InvalidTimeOfDay { .. } => {
                ErrorCategory::Input
            }
            MccError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Wiring | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應嚴重程度的程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MccError::ConfigValidationError { field, .. }
            | MccError::InvalidConfigValueError { field, .. } => {
                format!("Check the '{}' entry in the configuration file", field)
            }
            MccError::MissingConfigError { field } => {
                format!("Add the '{}' entry to the configuration file", field)
            }
            MccError::UrlParse(_) => {
                "Make sure client base URLs are absolute http(s) URLs".to_string()
            }
            MccError::MissingBinding { tag } => format!(
                "Add a [clients.{}] section to the configuration or bind the client at startup",
                tag
            ),
            MccError::DuplicateBinding { tag } => {
                format!("Bind the '{}' client only once during startup", tag)
            }
            MccError::Http(_) => "Check network connectivity and the client timeout".to_string(),
            MccError::UpstreamStatus { status, .. } if *status >= 500 => {
                "The upstream service is failing; retry later".to_string()
            }
            MccError::UpstreamStatus { .. } => {
                "Check the request path and the client's headers".to_string()
            }
            MccError::UnknownDayPart { .. } => format!(
                "Use one of: {}",
                crate::domain::day_part::DayPart::ALL
                    .iter()
                    .map(|part| part.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            MccError::InvalidTimeOfDay { .. } => {
                "Use HH:MM or HH:MM:SS (24-hour clock), or an RFC 3339 datetime".to_string()
            }
            MccError::IoError(_) => "Check that the file exists and is readable".to_string(),
            MccError::SerializationError(_) => {
                "The upstream response was not valid JSON".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Wiring => format!("Client wiring problem: {}", self),
            ErrorCategory::Upstream => format!("Upstream request failed: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
