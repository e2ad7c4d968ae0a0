//! Location adapter — used by the export trigger.
//!
//! Export is a navigation, not a fetch: the backend answers
//! `GET /export/{id}/{format}` with an attachment and the browser
//! handles the download.

use chat_core::ports::NavigatorPort;
use chat_types::{ClientError, Result};

pub struct WindowNavigator;

impl WindowNavigator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigatorPort for WindowNavigator {
    fn navigate(&self, url: &str) -> Result<()> {
        gloo_utils::window()
            .location()
            .assign(url)
            .map_err(|e| ClientError::JsInterop(format!("{:?}", e)))
    }
}
