use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("No finished gameweek is available upstream")]
    NoFinishedGameweek,

    #[error("Document store connection failed: {message}")]
    ConnectError { message: String },

    #[error("Bulk insert failed: {message}")]
    WriteError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// The pipeline stage a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Fetch,
    Connect,
    Write,
}

impl Stage {
    pub fn exit_code(self) -> i32 {
        match self {
            Stage::Config => 1,
            Stage::Fetch => 2,
            Stage::Connect => 3,
            Stage::Write => 4,
        }
    }
}

impl EtlError {
    pub fn connect(message: impl Into<String>) -> Self {
        Self::ConnectError {
            message: message.into(),
        }
    }

    pub fn write(message: impl Into<String>) -> Self {
        Self::WriteError {
            message: message.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            EtlError::ApiError(_) | EtlError::NoFinishedGameweek => Stage::Fetch,
            EtlError::ConnectError { .. } => Stage::Connect,
            EtlError::WriteError { .. } => Stage::Write,
            EtlError::IoError(_)
            | EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => Stage::Config,
        }
    }

    /// Process exit status for this failure. Zero is reserved for success.
    pub fn exit_code(&self) -> i32 {
        self.stage().exit_code()
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) => {
                "Check network access to the FPL API and that the gameweek exists"
            }
            EtlError::NoFinishedGameweek => "Pass an explicit --gameweek instead of --latest",
            EtlError::ConnectError { .. } => {
                "Check MONGODB_URI, the cluster's network allow-list and the credentials"
            }
            EtlError::WriteError { .. } => {
                "Check the collection's validators and indexes, then re-run the gameweek"
            }
            EtlError::IoError(_) => "Check that the file exists and is readable",
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => "Fix the configuration and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
