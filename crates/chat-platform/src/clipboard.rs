//! Async clipboard adapter.
//!
//! Wraps `navigator.clipboard.writeText()`. The promise rejects when the
//! platform denies clipboard access (permissions, insecure context); that
//! surfaces as `ClientError::Clipboard` and the UI shows a "Failed" label.

use async_trait::async_trait;
use wasm_bindgen_futures::JsFuture;

use chat_core::ports::ClipboardPort;
use chat_types::{ClientError, Result};

pub struct NavigatorClipboard;

impl NavigatorClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NavigatorClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ClipboardPort for NavigatorClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| ClientError::JsInterop("No window object".to_string()))?;
        let clipboard = window.navigator().clipboard();

        JsFuture::from(clipboard.write_text(text))
            .await
            .map_err(|e| ClientError::Clipboard(format!("{:?}", e)))?;
        Ok(())
    }
}
