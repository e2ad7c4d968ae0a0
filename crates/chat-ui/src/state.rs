//! UI-level state that drives rendering.
//! This is a read-only projection of the controller state,
//! updated each frame by draining the EventBus.

use chat_core::markup;
use chat_core::search::{group_hits, SearchGroup};
use chat_types::event::ChatEvent;
use chat_types::message::{Message, Sender};
use chat_types::session::{ExportFormat, SessionSummary};

/// Shown whenever a conversation has no messages yet.
pub const WELCOME_MARKUP: &str =
    "<p>Hello! I'm your AI assistant. Ask me anything and I'll do my best to help.</p>";

/// Text of the transient placeholder while a reply is in flight.
pub const TYPING_TEXT: &str = "Thinking…";

/// Copy-affordance feedback on a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyState {
    Idle,
    Copied,
    Failed,
}

/// A chat entry for display. `text` and `code_blocks` are projections of
/// `markup`, computed once on construction.
#[derive(Clone)]
pub struct ChatEntry {
    pub sender: Sender,
    pub markup: String,
    pub text: String,
    pub code_blocks: Vec<String>,
    pub is_error: bool,
    pub copy_state: CopyState,
}

impl ChatEntry {
    pub fn new(sender: Sender, markup: String) -> Self {
        let text = markup::visible_text(&markup);
        let code_blocks = markup::extract_code_blocks(&markup);
        Self {
            sender,
            markup,
            text,
            code_blocks,
            is_error: false,
            copy_state: CopyState::Idle,
        }
    }

    /// Assistant-styled inline error. The message is plain text and is
    /// never interpreted as markup.
    pub fn error(message: &str) -> Self {
        Self {
            sender: Sender::Assistant,
            markup: String::new(),
            text: message.to_string(),
            code_blocks: Vec::new(),
            is_error: true,
            copy_state: CopyState::Idle,
        }
    }

    fn set_markup(&mut self, markup: String) {
        self.text = markup::visible_text(&markup);
        self.code_blocks = markup::extract_code_blocks(&markup);
        self.markup = markup;
    }
}

/// What the left-hand panel is showing
#[derive(Clone)]
pub enum DirectoryView {
    Sessions,
    /// Search mode; empty `groups` renders the explicit no-results state
    SearchResults {
        query: String,
        groups: Vec<SearchGroup>,
    },
}

/// State visible to UI panels
pub struct UiState {
    /// Conversation entries in arrival order
    pub entries: Vec<ChatEntry>,
    /// Session directory, backend order (most recent first)
    pub sessions: Vec<SessionSummary>,
    pub active_session_id: String,
    /// True while a send operation is in flight (input locked)
    pub sending: bool,
    /// Typing placeholder row visibility
    pub typing: bool,
    pub input_text: String,
    pub search_text: String,
    pub directory: DirectoryView,
    pub show_export: bool,
    pub export_format: ExportFormat,
    /// Pending destructive action awaiting user confirmation
    pub confirm_delete: Option<SessionSummary>,
    /// One-shot focus flags, consumed by the panels
    pub focus_input: bool,
    pub focus_search: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            entries: vec![Self::welcome_entry()],
            sessions: Vec::new(),
            active_session_id: String::new(),
            sending: false,
            typing: false,
            input_text: String::new(),
            search_text: String::new(),
            directory: DirectoryView::Sessions,
            show_export: false,
            export_format: ExportFormat::Json,
            confirm_delete: None,
            focus_input: false,
            focus_search: false,
        }
    }

    fn welcome_entry() -> ChatEntry {
        ChatEntry::new(Sender::Assistant, WELCOME_MARKUP.to_string())
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::SendStart => {
                    self.sending = true;
                    self.typing = true;
                }
                ChatEvent::UserMarkupReady { entry, markup } => {
                    if let Some(e) = self.entries.get_mut(entry) {
                        e.set_markup(markup);
                    }
                }
                ChatEvent::AssistantMessage { markup } => {
                    self.typing = false;
                    self.entries.push(ChatEntry::new(Sender::Assistant, markup));
                }
                ChatEvent::SendError { message } => {
                    self.typing = false;
                    self.entries.push(ChatEntry::error(&message));
                }
                ChatEvent::SendFinished => {
                    self.sending = false;
                    self.typing = false;
                    self.focus_input = true;
                }
                ChatEvent::DirectoryLoaded { sessions } => {
                    self.sessions = sessions;
                }
                ChatEvent::SessionLoaded { id, messages } => {
                    self.active_session_id = id;
                    self.replace_conversation(&messages);
                }
                ChatEvent::SessionStarted { id } => {
                    self.active_session_id = id;
                    self.reset_conversation();
                }
                ChatEvent::ConversationCleared => {
                    self.reset_conversation();
                }
                ChatEvent::SearchResults { query, hits } => {
                    self.directory = DirectoryView::SearchResults {
                        query,
                        groups: group_hits(&hits),
                    };
                }
                ChatEvent::SearchCleared => {
                    self.leave_search();
                }
                ChatEvent::CopyResult { entry, ok } => {
                    if let Some(e) = self.entries.get_mut(entry) {
                        e.copy_state = if ok { CopyState::Copied } else { CopyState::Failed };
                    }
                }
                ChatEvent::CopyFeedbackExpired { entry } => {
                    if let Some(e) = self.entries.get_mut(entry) {
                        e.copy_state = CopyState::Idle;
                    }
                }
            }
        }
    }

    /// Optimistically append the user's input with the local escape
    /// fallback; returns the entry index for the in-place upgrade once
    /// `/format-preview` answers.
    pub fn push_user_entry(&mut self, text: &str) -> usize {
        self.entries
            .push(ChatEntry::new(Sender::User, markup::markup_from_plain(text)));
        self.entries.len() - 1
    }

    /// Wholesale replacement on session switch; no diffing, no leftovers.
    fn replace_conversation(&mut self, messages: &[Message]) {
        if messages.is_empty() {
            self.reset_conversation();
            return;
        }
        self.entries = messages
            .iter()
            .map(|m| {
                let markup = match m.display_markup() {
                    Some(f) => f.to_string(),
                    None => markup::markup_from_plain(&m.content),
                };
                ChatEntry::new(m.sender, markup)
            })
            .collect();
    }

    pub fn reset_conversation(&mut self) {
        self.entries = vec![Self::welcome_entry()];
        self.typing = false;
    }

    /// Back to the plain session directory; also clears the search box.
    pub fn leave_search(&mut self) {
        self.directory = DirectoryView::Sessions;
        self.search_text.clear();
    }

    pub fn is_busy(&self) -> bool {
        self.sending
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
