//! Translate request/response types shared by the handler and providers

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Body of `POST /translate`.
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: TextInput,
    #[serde(default)]
    pub target_lang: String,
    #[serde(default)]
    pub source_lang: Option<String>,
}

/// The `text` field, decoded from whatever JSON the client sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum TextInput {
    Single(String),
    /// String members of a JSON array, in order. Anything else in the array
    /// is dropped.
    Multiple(Vec<String>),
    #[default]
    Unsupported,
}

impl From<Value> for TextInput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => TextInput::Single(s),
            Value::Array(items) => TextInput::Multiple(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => TextInput::Unsupported,
        }
    }
}

/// A request that passed normalization and is ready to forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub text: String,
    pub target_lang: String,
    pub source_lang: Option<String>,
}

/// Successful provider reply. The body is relayed to the caller untouched.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: Map<String, Value>,
}

/// Why a provider call produced no translation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider could not be reached or the reply could not be read.
    #[error("{0}")]
    Transport(String),
    /// The provider answered with a non-2xx status.
    #[error("provider returned status {status}")]
    Api { status: u16, body: String },
    /// A 2xx reply whose body is not a JSON object.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

impl ProviderError {
    pub fn status(&self) -> u16 {
        match self {
            ProviderError::Api { status, .. } => *status,
            ProviderError::Transport(_) | ProviderError::Parse(_) => 500,
        }
    }
}

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<ProviderResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> TranslateRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn string_text_is_single() {
        let req = decode(r#"{"text":"hello","target_lang":"DE"}"#);
        assert_eq!(req.text, TextInput::Single("hello".into()));
        assert_eq!(req.target_lang, "DE");
        assert_eq!(req.source_lang, None);
    }

    #[test]
    fn array_keeps_only_strings_in_order() {
        let req = decode(r#"{"text":["a",1,"b",null,{"x":"y"},"c"],"target_lang":"FR"}"#);
        assert_eq!(
            req.text,
            TextInput::Multiple(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn other_shapes_are_unsupported() {
        for text in ["42", "true", "null", r#"{"a":"b"}"#] {
            let req = decode(&format!(r#"{{"text":{text},"target_lang":"FR"}}"#));
            assert_eq!(req.text, TextInput::Unsupported, "text = {text}");
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let req = decode("{}");
        assert_eq!(req.text, TextInput::Unsupported);
        assert_eq!(req.target_lang, "");
    }

    #[test]
    fn non_string_target_lang_is_rejected() {
        assert!(serde_json::from_str::<TranslateRequest>(r#"{"text":"hi","target_lang":5}"#).is_err());
    }
}
