use crate::doc_intel::DocIntelClient;
use crate::llm_client::LlmClient;

/// Shared application state injected into route handlers via Axum extractors.
/// Both collaborator handles are constructed once at startup and read-only
/// afterwards; `None` means the corresponding pipeline stage is skipped for
/// the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub llm: Option<LlmClient>,
    pub doc_intel: Option<DocIntelClient>,
}
