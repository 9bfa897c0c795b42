use thiserror::Error;

use super::interface::{NormalizedRequest, TextInput, TranslateRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("Text field must be string or array of strings")]
    UnsupportedTextShape,
    #[error("Text field is required and cannot be empty")]
    EmptyText,
    #[error("target_lang field is required")]
    MissingTargetLang,
}

/// Collapse the client's `text` into one trimmed string and trim the language
/// fields. A blank `source_lang` counts as absent.
pub fn normalize(
    text: &TextInput,
    target_lang: &str,
    source_lang: Option<&str>,
) -> Result<NormalizedRequest, NormalizationError> {
    let joined = match text {
        TextInput::Single(s) => s.clone(),
        TextInput::Multiple(parts) => parts.join(" "),
        TextInput::Unsupported => return Err(NormalizationError::UnsupportedTextShape),
    };

    let text = joined.trim();
    if text.is_empty() {
        return Err(NormalizationError::EmptyText);
    }

    let target_lang = target_lang.trim();
    if target_lang.is_empty() {
        return Err(NormalizationError::MissingTargetLang);
    }

    let source_lang = source_lang
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(NormalizedRequest {
        text: text.to_string(),
        target_lang: target_lang.to_string(),
        source_lang,
    })
}

impl TranslateRequest {
    pub fn normalize(&self) -> Result<NormalizedRequest, NormalizationError> {
        normalize(&self.text, &self.target_lang, self.source_lang.as_deref())
    }
}
