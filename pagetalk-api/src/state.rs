//! Application state shared across handlers.

use std::sync::Arc;

use pagetalk_browser::PageLoader;
use pagetalk_llm::traits::LlmClient;
use pagetalk_session::SessionStore;

/// Everything a request handler needs, injected once at startup.
pub struct AppState {
    pub store: SessionStore,
    pub llm: Arc<dyn LlmClient>,
    pub loader: Arc<dyn PageLoader>,
    /// Context size bound applied when composing and re-reading documents.
    pub truncation_budget: usize,
    /// Keyed-hash material for session cookie authentication, derived from
    /// the configured session secret.
    pub cookie_key: [u8; 32],
}

impl AppState {
    pub fn new(
        store: SessionStore,
        llm: Arc<dyn LlmClient>,
        loader: Arc<dyn PageLoader>,
        truncation_budget: usize,
        session_secret: &str,
    ) -> Self {
        Self {
            store,
            llm,
            loader,
            truncation_budget,
            cookie_key: derive_cookie_key(session_secret),
        }
    }
}

/// Stretch the configured secret into fixed-size key material.
fn derive_cookie_key(secret: &str) -> [u8; 32] {
    blake3::derive_key("pagetalk session cookie v1", secret.as_bytes())
}
