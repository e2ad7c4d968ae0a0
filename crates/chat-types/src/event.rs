use serde::{Deserialize, Serialize};
use crate::message::Message;
use crate::search::SearchHit;
use crate::session::SessionSummary;

/// Events emitted by the chat controller.
/// UI drains these each frame for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A send operation started: input locks, typing placeholder shows
    SendStart,

    /// The `/format-preview` round trip succeeded for the optimistic
    /// user entry at `entry`; replace its markup in place
    UserMarkupReady { entry: usize, markup: String },

    /// Backend replied with pre-formatted assistant markup
    AssistantMessage { markup: String },

    /// Send failed; `message` is rendered as plain text, never as markup
    SendError { message: String },

    /// Terminal event of every send branch: input unlocks and refocuses
    SendFinished,

    /// Session directory fetched (or re-fetched)
    DirectoryLoaded { sessions: Vec<SessionSummary> },

    /// A session's full history replaces the conversation view
    SessionLoaded { id: String, messages: Vec<Message> },

    /// A fresh session became active: reset view to the welcome message
    SessionStarted { id: String },

    /// The active conversation was cleared server-side
    ConversationCleared,

    /// Search produced hits (possibly none) for `query`
    SearchResults { query: String, hits: Vec<SearchHit> },

    /// Search mode left; the normal directory is shown again
    SearchCleared,

    /// Clipboard write for the entry's code block finished
    CopyResult { entry: usize, ok: bool },

    /// The 2s copy feedback window elapsed
    CopyFeedbackExpired { entry: usize },
}
