use std::sync::Arc;

use crate::config::Config;
use crate::translate::{DeepLClient, TranslationProvider};

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn TranslationProvider>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let provider = Arc::new(DeepLClient::new(
            config.deepl_endpoint.clone(),
            config.deepl_api_key.clone(),
        ));
        Self::with_provider(provider)
    }

    pub fn with_provider(provider: Arc<dyn TranslationProvider>) -> Self {
        Self { provider }
    }
}
