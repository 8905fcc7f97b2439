use std::sync::Arc;

use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable chat model. Default: `OllamaClient`. Tests swap in a canned model.
    pub model: Arc<dyn ChatModel>,
}
