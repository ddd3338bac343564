use std::sync::Arc;

use crate::fetch::PageFetcher;
use crate::llm_client::CompletionModel;
use crate::portfolio::Portfolio;

/// Shared application state injected into all route handlers via Axum
/// extractors. The fetcher and model sit behind traits so tests can swap in
/// mocks; the portfolio is loaded once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    pub model: Arc<dyn CompletionModel>,
    pub portfolio: Arc<Portfolio>,
}
