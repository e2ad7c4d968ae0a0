use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// Non-success status with an error payload from the backend
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Request never completed (transport-level failure)
    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}
