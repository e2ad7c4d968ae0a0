//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use chat_types::{
    message::Message,
    search::SearchHit,
    session::SessionSummary,
    Result,
};

// ─── Backend Port ────────────────────────────────────────────

/// The chat backend's HTTP surface. Exact payload schemas are owned by
/// the backend; the adapter maps them onto these methods.
#[async_trait(?Send)]
pub trait BackendPort {
    /// `GET /sessions` — the session directory, most recent first
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>>;

    /// `GET /sessions/{id}` — full message history of one session
    async fn session_messages(&self, id: &str) -> Result<Vec<Message>>;

    /// `DELETE /sessions/{id}`
    async fn delete_session(&self, id: &str) -> Result<()>;

    /// `POST /chat` — returns the assistant reply as pre-formatted markup
    async fn send_message(&self, text: &str, session_id: &str) -> Result<String>;

    /// `POST /format-preview` — server-side rendering of user input
    async fn format_preview(&self, text: &str) -> Result<String>;

    /// `POST /clear` — drop the session's history server-side
    async fn clear_session(&self, session_id: &str) -> Result<()>;

    /// `POST /search` — matching messages across all sessions
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

// ─── Storage Port ────────────────────────────────────────────

/// Durable key/value storage for client-side state (the active session id).
#[async_trait(?Send)]
pub trait StoragePort {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Clipboard Port ──────────────────────────────────────────

#[async_trait(?Send)]
pub trait ClipboardPort {
    async fn write_text(&self, text: &str) -> Result<()>;
}

// ─── Navigator Port ──────────────────────────────────────────

/// Browser navigation, used for file-download endpoints.
pub trait NavigatorPort {
    fn navigate(&self, url: &str) -> Result<()>;
}
