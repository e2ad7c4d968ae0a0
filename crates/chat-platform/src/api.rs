//! HTTP adapter for the chat backend.
//!
//! Speaks the backend's JSON surface over browser `fetch()` via gloo-net.
//! Non-success statuses carry an `{ "error": ... }` payload which is
//! surfaced as `ClientError::Backend`; transport-level failures map to
//! `ClientError::Network`.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};

use chat_core::ports::BackendPort;
use chat_types::{
    message::Message,
    search::SearchHit,
    session::SessionSummary,
    ClientError, Result,
};

pub struct HttpBackend {
    base_url: String,
}

impl HttpBackend {
    /// `base_url` may be empty for same-origin requests.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait(?Send)]
impl BackendPort for HttpBackend {
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let response = Request::get(&self.url("/sessions"))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let response = check_status(response).await?;

        let data: SessionsResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(data.sessions)
    }

    async fn session_messages(&self, id: &str) -> Result<Vec<Message>> {
        let response = Request::get(&self.url(&format!("/sessions/{}", id)))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let response = check_status(response).await?;

        let data: HistoryResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(data.messages)
    }

    async fn delete_session(&self, id: &str) -> Result<()> {
        let response = Request::delete(&self.url(&format!("/sessions/{}", id)))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    async fn send_message(&self, text: &str, session_id: &str) -> Result<String> {
        let body = ChatRequestBody {
            message: text,
            session_id,
        };
        let response = Request::post(&self.url("/chat"))
            .header("Content-Type", "application/json")
            .json(&body)
            .map_err(|e| ClientError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let response = check_status(response).await?;

        let data: ChatResponseBody = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;

        match (data.response, data.error) {
            (Some(markup), _) => Ok(markup),
            (None, Some(error)) => Err(ClientError::Backend {
                status: 200,
                message: error,
            }),
            (None, None) => Err(ClientError::Other(
                "chat response had neither reply nor error".to_string(),
            )),
        }
    }

    async fn format_preview(&self, text: &str) -> Result<String> {
        let response = Request::post(&self.url("/format-preview"))
            .header("Content-Type", "application/json")
            .json(&FormatRequestBody { text })
            .map_err(|e| ClientError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let response = check_status(response).await?;

        let data: FormatResponseBody = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(data.formatted)
    }

    async fn clear_session(&self, session_id: &str) -> Result<()> {
        let response = Request::post(&self.url("/clear"))
            .header("Content-Type", "application/json")
            .json(&ClearRequestBody { session_id })
            .map_err(|e| ClientError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response = Request::post(&self.url("/search"))
            .header("Content-Type", "application/json")
            .json(&SearchRequestBody { query })
            .map_err(|e| ClientError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let response = check_status(response).await?;

        let data: SearchResponseBody = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        Ok(data.results)
    }
}

/// Pass 2xx responses through; turn anything else into
/// `ClientError::Backend` with the payload's error text when present.
async fn check_status(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {}", status),
    };
    Err(ClientError::Backend { status, message })
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    message: &'a str,
    session_id: &'a str,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct SessionsResponse {
    sessions: Vec<SessionSummary>,
}

#[derive(Deserialize)]
struct HistoryResponse {
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct FormatRequestBody<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct FormatResponseBody {
    formatted: String,
}

#[derive(Serialize)]
struct ClearRequestBody<'a> {
    session_id: &'a str,
}

#[derive(Serialize)]
struct SearchRequestBody<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct SearchResponseBody {
    results: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}
