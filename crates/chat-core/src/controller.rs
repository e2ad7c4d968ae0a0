//! Chat controller — session lifecycle and the send flow.
//!
//! Owns the active session pointer and the in-memory session directory;
//! every mutation flows out as a `ChatEvent` on the bus, which the UI
//! drains each frame. All methods are async and must be spawned via
//! `wasm_bindgen_futures::spawn_local`; the UI thread is never blocked.
//! Invariant: RefCell borrows are never held across an await point —
//! operations may overlap (a directory refresh racing a search).

use std::cell::RefCell;

use chat_types::{
    event::ChatEvent,
    session::{new_session_id, ExportFormat, SessionSummary},
    ClientError,
};
use crate::event_bus::EventBus;
use crate::ports::{BackendPort, StoragePort};

/// Storage key holding the active session id across page reloads.
pub const ACTIVE_SESSION_KEY: &str = "chat:active_session";

/// Appended as a plain-text assistant-styled entry when the request
/// itself never completed. No automatic retry; the user resends.
pub const TRANSPORT_ERROR_TEXT: &str =
    "Sorry, I couldn't reach the server. Please check your connection and try again.";

pub struct ChatController {
    current: RefCell<String>,
    sessions: RefCell<Vec<SessionSummary>>,
    pub event_bus: EventBus,
}

impl ChatController {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            current: RefCell::new(String::new()),
            sessions: RefCell::new(Vec::new()),
            event_bus,
        }
    }

    pub fn current_session_id(&self) -> String {
        self.current.borrow().clone()
    }

    pub fn set_current_session_id(&self, id: &str) {
        *self.current.borrow_mut() = id.to_string();
    }

    /// Startup: restore (or mint) the active session id, fetch the
    /// directory, and load the active session's history if the backend
    /// knows it. An unknown id is treated as a fresh, empty session.
    pub async fn bootstrap(&self, backend: &dyn BackendPort, storage: &dyn StoragePort) {
        let persisted = match storage.get(ACTIVE_SESSION_KEY).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("session storage unavailable: {}", e);
                None
            }
        };

        let id = match persisted {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = new_session_id();
                self.persist_active_id(storage, &id).await;
                id
            }
        };
        self.set_current_session_id(&id);

        self.refresh_directory(backend).await;

        let known = self.sessions.borrow().iter().any(|s| s.id == id);
        if known {
            self.switch_to(&id, backend, storage).await;
        } else {
            self.event_bus.emit(ChatEvent::SessionStarted { id });
        }
    }

    /// Re-fetch the session directory. Failures degrade silently:
    /// the conversation view stays usable, so this only logs.
    pub async fn refresh_directory(&self, backend: &dyn BackendPort) {
        match backend.list_sessions().await {
            Ok(sessions) => {
                *self.sessions.borrow_mut() = sessions.clone();
                self.event_bus.emit(ChatEvent::DirectoryLoaded { sessions });
            }
            Err(e) => log::warn!("directory refresh failed: {}", e),
        }
    }

    /// Start a fresh conversation under a newly minted id.
    pub async fn create_new(&self, backend: &dyn BackendPort, storage: &dyn StoragePort) {
        let id = new_session_id();
        self.set_current_session_id(&id);
        self.persist_active_id(storage, &id).await;
        self.event_bus.emit(ChatEvent::SessionStarted { id });
        self.refresh_directory(backend).await;
    }

    /// Load `id` and replace the conversation view wholesale.
    /// On failure the current view is left untouched (silent degrade,
    /// no retry).
    pub async fn switch_to(
        &self,
        id: &str,
        backend: &dyn BackendPort,
        storage: &dyn StoragePort,
    ) {
        match backend.session_messages(id).await {
            Ok(messages) => {
                self.set_current_session_id(id);
                self.persist_active_id(storage, id).await;
                self.event_bus.emit(ChatEvent::SessionLoaded {
                    id: id.to_string(),
                    messages,
                });
            }
            Err(e) => log::error!("failed to load session {}: {}", id, e),
        }
    }

    /// Delete a session. The caller is responsible for the confirmation
    /// step; by the time this runs the user has already agreed.
    pub async fn delete(
        &self,
        id: &str,
        backend: &dyn BackendPort,
        storage: &dyn StoragePort,
    ) {
        if let Err(e) = backend.delete_session(id).await {
            log::error!("failed to delete session {}: {}", id, e);
            return;
        }
        if id == self.current_session_id() {
            self.create_new(backend, storage).await;
        } else {
            self.refresh_directory(backend).await;
        }
    }

    /// Drop the active session's history server-side. The id is kept:
    /// it is a fresh candidate again until the next accepted message.
    pub async fn clear(&self, backend: &dyn BackendPort) {
        match backend.clear_session(&self.current_session_id()).await {
            Ok(()) => {
                self.event_bus.emit(ChatEvent::ConversationCleared);
                self.refresh_directory(backend).await;
            }
            Err(e) => log::error!("failed to clear session: {}", e),
        }
    }

    /// One send operation, strictly sequential. The UI has already
    /// appended the user's entry optimistically at index `entry` with
    /// locally escaped markup; a successful `/format-preview` round trip
    /// upgrades it in place. Every branch ends with `SendFinished` so the
    /// input always unlocks.
    pub async fn send(&self, text: &str, entry: usize, backend: &dyn BackendPort) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.event_bus.emit(ChatEvent::SendStart);

        match backend.format_preview(trimmed).await {
            Ok(markup) => self
                .event_bus
                .emit(ChatEvent::UserMarkupReady { entry, markup }),
            Err(e) => log::warn!("format preview failed, keeping local fallback: {}", e),
        }

        match backend.send_message(trimmed, &self.current_session_id()).await {
            Ok(markup) => {
                self.event_bus.emit(ChatEvent::AssistantMessage { markup });
                self.refresh_directory(backend).await;
            }
            Err(ClientError::Backend { message, .. }) => {
                log::error!("send rejected by backend: {}", message);
                self.event_bus.emit(ChatEvent::SendError {
                    message: format!("Error: {}", message),
                });
            }
            Err(e) => {
                log::error!("send transport failure: {}", e);
                self.event_bus.emit(ChatEvent::SendError {
                    message: TRANSPORT_ERROR_TEXT.to_string(),
                });
            }
        }

        self.event_bus.emit(ChatEvent::SendFinished);
    }

    /// Issue a search. Whitespace-only queries leave search mode instead.
    /// Query failures degrade silently like directory refreshes.
    pub async fn run_search(&self, query: &str, backend: &dyn BackendPort) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.event_bus.emit(ChatEvent::SearchCleared);
            return;
        }
        match backend.search(trimmed).await {
            Ok(hits) => self.event_bus.emit(ChatEvent::SearchResults {
                query: trimmed.to_string(),
                hits,
            }),
            Err(e) => log::warn!("search failed: {}", e),
        }
    }

    async fn persist_active_id(&self, storage: &dyn StoragePort, id: &str) {
        if let Err(e) = storage.set(ACTIVE_SESSION_KEY, id).await {
            log::warn!("failed to persist active session id: {}", e);
        }
    }
}

/// Download URL for the export endpoint. The browser navigates here
/// instead of fetching; the backend answers with an attachment.
pub fn export_url(base_url: &str, session_id: &str, format: ExportFormat) -> String {
    format!(
        "{}/export/{}/{}",
        base_url.trim_end_matches('/'),
        session_id,
        format.as_str()
    )
}
