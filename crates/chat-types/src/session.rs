use serde::{Deserialize, Serialize};

/// Summary of a session as returned by `GET /sessions`.
/// The backend owns titles (auto-generated from the first user message)
/// and ordering (most recently updated first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub updated_at: String,
    pub message_count: usize,
}

/// Format accepted by `GET /export/{id}/{format}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Txt,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Txt => "Plain text",
        }
    }

    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Json, ExportFormat::Txt]
    }
}

/// Generate a candidate session id: time component plus random suffix.
/// The id only becomes durable once the backend accepts a message under it.
pub fn new_session_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("session_{}_{}", millis, &suffix[..9])
}
