use std::sync::Arc;

use crate::planning::narrator::NarrativeGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable plan writer. Default: LlmNarrativeGenerator over the shared LlmClient.
    pub narrator: Arc<dyn NarrativeGenerator>,
}
