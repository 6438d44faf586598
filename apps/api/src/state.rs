use std::sync::Arc;

use crate::llm_client::ChatProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Chat-completion provider. `CohereClient` in production, stubs in tests.
    pub provider: Arc<dyn ChatProvider>,
}
