use std::sync::Arc;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Admin session tokens. Injected so the store's lifetime follows the
    /// application context and tests can swap in their own.
    pub sessions: Arc<dyn SessionStore>,
    pub config: Config,
}
