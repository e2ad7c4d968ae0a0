//! WASM-target tests for chat-core.
//!
//! Mirrors the key native unit tests under wasm32-unknown-unknown via
//! `wasm-pack test --node`. Async controller tests run natively on the
//! wasm-bindgen-test executor instead of a hand-rolled block_on.

use wasm_bindgen_test::*;

use async_trait::async_trait;
use chat_core::controller::{export_url, ChatController, ACTIVE_SESSION_KEY};
use chat_core::event_bus::EventBus;
use chat_core::markup::*;
use chat_core::ports::*;
use chat_core::search::*;
use chat_types::event::ChatEvent;
use chat_types::message::*;
use chat_types::search::SearchHit;
use chat_types::session::{ExportFormat, SessionSummary};
use chat_types::ClientError;
use std::cell::RefCell;
use std::collections::HashMap;

// ─── EventBus ────────────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(ChatEvent::SendStart);
    bus.emit(ChatEvent::SendFinished);
    assert!(bus.has_pending());
    assert_eq!(bus.drain().len(), 2);
    assert!(!bus.has_pending());
}

// ─── Markup ──────────────────────────────────────────────

#[wasm_bindgen_test]
fn escape_then_visible_text_roundtrip() {
    let original = r#"<b>"x" & 'y'</b>"#;
    assert_eq!(visible_text(&escape_html(original)), original);
}

#[wasm_bindgen_test]
fn markup_from_plain_breaks_lines() {
    assert_eq!(markup_from_plain("a\nb"), "a<br>b");
}

#[wasm_bindgen_test]
fn code_block_extraction() {
    let markup = "<pre><code>let x = 1;</code></pre>";
    assert_eq!(extract_code_blocks(markup), vec!["let x = 1;".to_string()]);
}

// ─── Search shaping ──────────────────────────────────────

fn hit(session: &str, content: &str) -> SearchHit {
    SearchHit {
        session_id: session.to_string(),
        session_title: "Title".to_string(),
        sender: Sender::User,
        content: content.to_string(),
        timestamp: None,
    }
}

#[wasm_bindgen_test]
fn group_hits_caps_and_counts() {
    let hits = vec![hit("a", "1"), hit("a", "2"), hit("a", "3")];
    let groups = group_hits(&hits);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].hits.len(), SNIPPETS_PER_SESSION);
    assert_eq!(groups[0].hidden, 1);
}

#[wasm_bindgen_test]
fn highlight_preserves_original_casing() {
    let spans = highlight_spans("Hello world", "hello");
    assert_eq!(spans[0].text, "Hello");
    assert!(spans[0].highlighted);
}

#[wasm_bindgen_test]
fn export_url_shape() {
    assert_eq!(export_url("", "s1", ExportFormat::Txt), "/export/s1/txt");
}

// ─── Controller (async) ──────────────────────────────────

#[derive(Default)]
struct MockBackend {
    sessions: RefCell<Vec<SessionSummary>>,
    histories: RefCell<HashMap<String, Vec<Message>>>,
    reply_markup: String,
}

#[async_trait(?Send)]
impl BackendPort for MockBackend {
    async fn list_sessions(&self) -> chat_types::Result<Vec<SessionSummary>> {
        Ok(self.sessions.borrow().clone())
    }

    async fn session_messages(&self, id: &str) -> chat_types::Result<Vec<Message>> {
        self.histories
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::Backend {
                status: 404,
                message: "Session not found".to_string(),
            })
    }

    async fn delete_session(&self, _id: &str) -> chat_types::Result<()> {
        Ok(())
    }

    async fn send_message(&self, _text: &str, _session_id: &str) -> chat_types::Result<String> {
        Ok(self.reply_markup.clone())
    }

    async fn format_preview(&self, text: &str) -> chat_types::Result<String> {
        Ok(format!("<p>{}</p>", text))
    }

    async fn clear_session(&self, _session_id: &str) -> chat_types::Result<()> {
        Ok(())
    }

    async fn search(&self, _query: &str) -> chat_types::Result<Vec<SearchHit>> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct MockStorage {
    data: RefCell<HashMap<String, String>>,
}

#[async_trait(?Send)]
impl StoragePort for MockStorage {
    async fn get(&self, key: &str) -> chat_types::Result<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> chat_types::Result<()> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> chat_types::Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

#[wasm_bindgen_test]
async fn send_happy_path_ends_finished() {
    let bus = EventBus::new();
    let ctrl = ChatController::new(bus.clone());
    ctrl.set_current_session_id("active");
    let backend = MockBackend {
        reply_markup: "<p>Hi!</p>".to_string(),
        ..MockBackend::default()
    };

    ctrl.send("hello", 0, &backend).await;

    let events = bus.drain();
    assert!(matches!(events.first(), Some(ChatEvent::SendStart)));
    assert!(matches!(events.last(), Some(ChatEvent::SendFinished)));
}

#[wasm_bindgen_test]
async fn bootstrap_persists_generated_id() {
    let bus = EventBus::new();
    let ctrl = ChatController::new(bus.clone());
    let backend = MockBackend::default();
    let storage = MockStorage::default();

    ctrl.bootstrap(&backend, &storage).await;

    let stored = storage.get(ACTIVE_SESSION_KEY).await.unwrap();
    assert_eq!(stored.as_deref(), Some(ctrl.current_session_id().as_str()));
}
