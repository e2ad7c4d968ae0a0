use serde::{Deserialize, Serialize};
use crate::message::Sender;

/// One matching message from `POST /search`. View-only data:
/// grouped by session client-side, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub session_id: String,
    pub session_title: String,
    pub sender: Sender,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<String>,
}
