use thiserror::Error;

/// Local precondition failures. These never reach the network.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRejection {
    #[error("No files selected")]
    NoFiles,

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("A narration is already in progress")]
    NarrationInFlight,

    #[error("Nothing to narrate")]
    EmptyNarrationText,
}

#[derive(Error, Debug)]
pub enum DatacleanError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid service address: {0}")]
    InvalidUrl(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error(transparent)]
    Guard(#[from] GuardRejection),

    #[error("DatacleanError: {0}")]
    Custom(String),
}

impl DatacleanError {
    /// Failures that happened before or during the exchange with a remote service.
    pub fn is_transport(&self) -> bool {
        matches!(self, DatacleanError::Reqwest(_) | DatacleanError::HttpStatus { .. })
    }
}

impl From<std::io::Error> for DatacleanError {
    fn from(error: std::io::Error) -> Self {
        DatacleanError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for DatacleanError {
    fn from(error: reqwest::Error) -> Self {
        DatacleanError::Reqwest(Box::new(error))
    }
}

impl From<tempfile::PersistError> for DatacleanError {
    fn from(error: tempfile::PersistError) -> Self {
        DatacleanError::Io(Box::new(error.error))
    }
}
