use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(&self) -> &str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        }
    }
}

/// A single message in a conversation, as stored by the backend.
///
/// `formatted_content` is safe markup produced server-side; when it is
/// absent the client renders `content` through its local escape fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub formatted_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: text.into(),
            formatted_content: None,
            timestamp: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            content: text.into(),
            formatted_content: None,
            timestamp: None,
        }
    }

    /// The markup to display: backend-formatted when present,
    /// otherwise the raw content (caller escapes).
    pub fn display_markup(&self) -> Option<&str> {
        self.formatted_content.as_deref()
    }
}
