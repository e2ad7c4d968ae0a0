//! WASM-target tests for chat-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_types::config::*;
use chat_types::error::*;
use chat_types::event::*;
use chat_types::message::*;
use chat_types::search::*;
use chat_types::session::*;

// ─── Message Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn message_user() {
    let msg = Message::user("Hello");
    assert_eq!(msg.sender, Sender::User);
    assert_eq!(msg.content, "Hello");
    assert!(msg.formatted_content.is_none());
}

#[wasm_bindgen_test]
fn message_assistant() {
    let msg = Message::assistant("I can help");
    assert_eq!(msg.sender, Sender::Assistant);
    assert_eq!(msg.content, "I can help");
}

#[wasm_bindgen_test]
fn message_serialization_roundtrip() {
    let msg = Message::user("test input");
    let json = serde_json::to_string(&msg).unwrap();
    let deserialized: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.sender, Sender::User);
    assert_eq!(deserialized.content, "test input");
}

#[wasm_bindgen_test]
fn sender_serialization() {
    assert_eq!(serde_json::to_string(&Sender::User).unwrap(), r#""user""#);
    assert_eq!(
        serde_json::to_string(&Sender::Assistant).unwrap(),
        r#""assistant""#
    );
}

// ─── Event Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn chat_event_serialization() {
    let event = ChatEvent::SendStart;
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("SendStart"));
}

#[wasm_bindgen_test]
fn chat_event_search_results_roundtrip() {
    let event = ChatEvent::SearchResults {
        query: "hello".to_string(),
        hits: vec![SearchHit {
            session_id: "s1".to_string(),
            session_title: "New Chat".to_string(),
            sender: Sender::User,
            content: "Hello world".to_string(),
            timestamp: None,
        }],
    };
    let json = serde_json::to_string(&event).unwrap();
    let deserialized: ChatEvent = serde_json::from_str(&json).unwrap();
    if let ChatEvent::SearchResults { query, hits } = deserialized {
        assert_eq!(query, "hello");
        assert_eq!(hits.len(), 1);
    } else {
        panic!("Wrong variant");
    }
}

// ─── Session Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn session_summary_serialization() {
    let summary = SessionSummary {
        id: "s1".to_string(),
        title: "Chat about Rust".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
        message_count: 5,
    };
    let json = serde_json::to_string(&summary).unwrap();
    let deserialized: SessionSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.message_count, 5);
}

#[wasm_bindgen_test]
fn new_session_id_shape() {
    let id = new_session_id();
    assert!(id.starts_with("session_"));
    assert_ne!(id, new_session_id());
}

#[wasm_bindgen_test]
fn export_format_strings() {
    assert_eq!(ExportFormat::Json.as_str(), "json");
    assert_eq!(ExportFormat::Txt.as_str(), "txt");
}

// ─── Error Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn error_display() {
    let err = ClientError::Backend {
        status: 404,
        message: "Session not found".to_string(),
    };
    assert_eq!(err.to_string(), "Backend error (404): Session not found");
}

#[wasm_bindgen_test]
fn error_from_serde() {
    let bad_json = "{{invalid}}";
    let serde_err = serde_json::from_str::<serde_json::Value>(bad_json).unwrap_err();
    let client_err: ClientError = serde_err.into();
    assert!(matches!(client_err, ClientError::Serialization(_)));
}

#[wasm_bindgen_test]
fn default_config() {
    let config = ClientConfig::default();
    assert!(config.api.base_url.is_empty());
    assert_eq!(config.storage.backend, StorageBackendType::Auto);
}
