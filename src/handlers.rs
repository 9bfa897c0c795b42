use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::TranslateError;
use crate::state::AppState;
use crate::translate::{TranslateRequest, TranslationProvider};

/// `POST /translate`: parse, normalize, forward to the provider and relay its
/// answer.
#[tracing::instrument(name = "POST /translate", skip_all)]
pub async fn translate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Map<String, Value>>), TranslateError> {
    let request: TranslateRequest = serde_json::from_slice(&body)?;
    debug!("Parsed translate request: {:?}", request);

    let normalized = request.normalize()?;
    info!(
        target_lang = %normalized.target_lang,
        source_lang = ?normalized.source_lang,
        chars = normalized.text.chars().count(),
        "Forwarding translation request"
    );

    let response = state
        .provider
        .translate(
            &normalized.text,
            &normalized.target_lang,
            normalized.source_lang.as_deref(),
        )
        .await?;

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK);
    Ok((status, Json(response.body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::interface::{ProviderError, ProviderResponse};
    use async_trait::async_trait;
    use axum::response::IntoResponse;
    use std::sync::{Arc, Mutex};

    /// Records each call and answers with a fixed outcome.
    struct StubProvider {
        calls: Mutex<Vec<(String, String, Option<String>)>>,
        reply: fn() -> Result<ProviderResponse, ProviderError>,
    }

    #[async_trait]
    impl TranslationProvider for StubProvider {
        async fn translate(
            &self,
            text: &str,
            target_lang: &str,
            source_lang: Option<&str>,
        ) -> Result<ProviderResponse, ProviderError> {
            self.calls.lock().unwrap().push((
                text.to_string(),
                target_lang.to_string(),
                source_lang.map(str::to_string),
            ));
            (self.reply)()
        }
    }

    fn bonjour() -> Result<ProviderResponse, ProviderError> {
        let body = serde_json::json!({"translations": [{"text": "Bonjour"}]});
        match body {
            Value::Object(body) => Ok(ProviderResponse { status: 200, body }),
            _ => unreachable!(),
        }
    }

    fn state_with(reply: fn() -> Result<ProviderResponse, ProviderError>) -> (AppState, Arc<StubProvider>) {
        let stub = Arc::new(StubProvider {
            calls: Mutex::new(Vec::new()),
            reply,
        });
        (AppState::with_provider(stub.clone()), stub)
    }

    async fn call(state: &AppState, body: &str) -> Result<Map<String, Value>, TranslateError> {
        let (status, Json(body)) = translate(State(state.clone()), Bytes::from(body.to_string())).await?;
        assert_eq!(status, StatusCode::OK);
        Ok(body)
    }

    #[tokio::test]
    async fn forwards_normalized_fields() {
        let (state, stub) = state_with(bonjour);
        let body = call(
            &state,
            r#"{"text":["  Hello", 7, "world  "],"target_lang":" FR ","source_lang":" EN "}"#,
        )
        .await
        .unwrap();

        assert_eq!(body["translations"][0]["text"], "Bonjour");
        let calls = stub.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[("Hello world".to_string(), "FR".to_string(), Some("EN".to_string()))]
        );
    }

    #[tokio::test]
    async fn rejected_requests_never_reach_the_provider() {
        let (state, stub) = state_with(bonjour);
        for body in [
            "not json",
            r#"{"text":42,"target_lang":"FR"}"#,
            r#"{"text":"   ","target_lang":"FR"}"#,
            r#"{"text":"hello","target_lang":""}"#,
        ] {
            let err = call(&state, body).await.unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "body = {body}");
        }
        assert!(stub.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_becomes_error_response() {
        let (state, _) = state_with(|| {
            Err(ProviderError::Api {
                status: 403,
                body: r#"{"message":"Forbidden"}"#.into(),
            })
        });
        let err = call(&state, r#"{"text":"hi","target_lang":"DE"}"#).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn repeated_requests_call_the_provider_each_time() {
        let (state, stub) = state_with(bonjour);
        let body = r#"{"text":"Hello","target_lang":"FR"}"#;
        let first = call(&state, body).await.unwrap();
        let second = call(&state, body).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(stub.calls.lock().unwrap().len(), 2);
    }
}
