#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::event::*;
    use crate::config::*;
    use crate::session::*;
    use crate::search::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.content, "Hello");
        assert!(msg.formatted_content.is_none());
        assert!(msg.timestamp.is_none());
    }

    #[test]
    fn test_message_assistant() {
        let msg = Message::assistant("I can help");
        assert_eq!(msg.sender, Sender::Assistant);
        assert_eq!(msg.content, "I can help");
    }

    #[test]
    fn test_message_display_markup() {
        let mut msg = Message::assistant("plain");
        assert!(msg.display_markup().is_none());

        msg.formatted_content = Some("<p>plain</p>".to_string());
        assert_eq!(msg.display_markup(), Some("<p>plain</p>"));
    }

    #[test]
    fn test_message_serialization_roundtrip() {
        let msg = Message::user("test input");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.sender, Sender::User);
        assert_eq!(deserialized.content, "test input");
    }

    #[test]
    fn test_message_deserializes_backend_row() {
        // Shape of a row from GET /sessions/{id}
        let json = r#"{
            "sender": "assistant",
            "content": "Hi there",
            "formatted_content": "<p>Hi there</p>",
            "timestamp": "2026-08-01 12:00:00"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.sender, Sender::Assistant);
        assert_eq!(msg.formatted_content.as_deref(), Some("<p>Hi there</p>"));
        assert!(msg.timestamp.is_some());
    }

    #[test]
    fn test_sender_serialization() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Sender::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn test_sender_deserialization() {
        let sender: Sender = serde_json::from_str(r#""user""#).unwrap();
        assert_eq!(sender, Sender::User);
    }

    #[test]
    fn test_sender_labels() {
        assert_eq!(Sender::User.label(), "You");
        assert_eq!(Sender::Assistant.label(), "Assistant");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::SendStart;
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("SendStart"));
    }

    #[test]
    fn test_chat_event_assistant_message() {
        let event = ChatEvent::AssistantMessage {
            markup: "<p>Hello world</p>".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Hello world"));
    }

    #[test]
    fn test_chat_event_session_loaded_roundtrip() {
        let event = ChatEvent::SessionLoaded {
            id: "s1".to_string(),
            messages: vec![Message::user("hi")],
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: ChatEvent = serde_json::from_str(&json).unwrap();
        if let ChatEvent::SessionLoaded { id, messages } = deserialized {
            assert_eq!(id, "s1");
            assert_eq!(messages.len(), 1);
        } else {
            panic!("Wrong variant");
        }
    }

    #[test]
    fn test_chat_event_copy_result() {
        let event = ChatEvent::CopyResult { entry: 3, ok: true };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: ChatEvent = serde_json::from_str(&json).unwrap();
        if let ChatEvent::CopyResult { entry, ok } = deserialized {
            assert_eq!(entry, 3);
            assert!(ok);
        } else {
            panic!("Wrong variant");
        }
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_session_summary_serialization() {
        let summary = SessionSummary {
            id: "s1".to_string(),
            title: "Chat about Rust".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
            message_count: 5,
        };
        let json = serde_json::to_string(&summary).unwrap();
        let deserialized: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.message_count, 5);
        assert_eq!(deserialized.title, "Chat about Rust");
    }

    #[test]
    fn test_new_session_id_shape() {
        let id = new_session_id();
        assert!(id.starts_with("session_"));
        // session_<millis>_<9-char suffix>
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_new_session_ids_distinct() {
        let a = new_session_id();
        let b = new_session_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_export_format_strings() {
        assert_eq!(ExportFormat::Json.as_str(), "json");
        assert_eq!(ExportFormat::Txt.as_str(), "txt");
        assert_eq!(ExportFormat::all().len(), 2);
    }

    // ─── Search Tests ────────────────────────────────────────

    #[test]
    fn test_search_hit_deserialization() {
        let json = r#"{
            "session_id": "s1",
            "session_title": "New Chat",
            "sender": "user",
            "content": "hello world",
            "timestamp": "2026-08-01 12:00:00"
        }"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.session_id, "s1");
        assert_eq!(hit.sender, Sender::User);
        assert_eq!(hit.content, "hello world");
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.api.base_url.is_empty());
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ClientConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.storage.backend, StorageBackendType::Auto);
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = ClientError::Backend {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error (500): boom");

        let err = ClientError::Network("fetch failed".to_string());
        assert_eq!(err.to_string(), "Network error: fetch failed");

        let err = ClientError::Clipboard("denied".to_string());
        assert_eq!(err.to_string(), "Clipboard error: denied");
    }

    #[test]
    fn test_error_from_serde() {
        let bad_json = "{{invalid}}";
        let serde_err = serde_json::from_str::<serde_json::Value>(bad_json).unwrap_err();
        let client_err: ClientError = serde_err.into();
        assert!(matches!(client_err, ClientError::Serialization(_)));
    }

    #[test]
    fn test_error_clone() {
        let err = ClientError::Network("timeout".to_string());
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
