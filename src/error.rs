use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    HttpError { status: StatusCode, url: String },

    #[error("Improperly formatted data: {0}")]
    ImproperlyFormattedData(String),

    #[error("No repositories available for organization: {0}")]
    NoRepositories(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RankerError {
    /// Process exit status reported by the command-line tool.
    pub fn exit_code(&self) -> i32 {
        match self {
            RankerError::InvalidArgument(_) => -1,
            RankerError::NetworkError(_) => -4,
            RankerError::HttpError { status, .. } if *status == StatusCode::NOT_FOUND => -6,
            RankerError::HttpError { .. } => -5,
            RankerError::NoRepositories(_) => -6,
            RankerError::Config(_) | RankerError::IoError(_) => -7,
            RankerError::ImproperlyFormattedData(_) => -8,
        }
    }
}

pub type Result<T> = std::result::Result<T, RankerError>;
