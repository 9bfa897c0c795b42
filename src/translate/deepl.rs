use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::interface::{ProviderError, ProviderResponse, TranslationProvider};

/// Client for the DeepL `/v2/translate` endpoint
pub struct DeepLClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl DeepLClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TranslationProvider for DeepLClient {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<ProviderResponse, ProviderError> {
        let mut form = vec![("text", text), ("target_lang", target_lang)];
        if let Some(source) = source_lang {
            form.push(("source_lang", source));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.api_key))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                warn!("DeepL request failed: {}", e);
                ProviderError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        debug!("DeepL response (status {}): {} bytes", status.as_u16(), body.len());

        if !status.is_success() {
            warn!("DeepL returned {}: {}", status.as_u16(), body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Map<String, Value> = serde_json::from_str(&body)?;
        Ok(ProviderResponse { status: 200, body })
    }
}
