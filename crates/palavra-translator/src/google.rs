use async_trait::async_trait;

use crate::http::read_json;
use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

const DEFAULT_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Keyless Google Translate web endpoint
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_URL.to_string())
    }

    pub fn with_url(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

/// The endpoint answers with nested arrays: `[[["house","casa",...], ...], ...]`.
/// The translation is the concatenation of the first element of every segment.
pub(crate) fn parse_response(json: &serde_json::Value) -> Result<String, TranslateError> {
    let segments = json
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| TranslateError::ApiError("Unexpected response shape".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
        .collect();

    let text = text.trim();
    if text.is_empty() {
        return Err(TranslateError::EmptyResult);
    }

    Ok(text.to_string())
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let params = [
            ("client", "gtx"),
            ("sl", from.as_str()),
            ("tl", to.as_str()),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self.client.get(&self.api_url).query(&params).send().await?;
        let body = read_json(response).await?;

        Ok(Translation {
            text: parse_response(&body)?,
            from,
            to,
            provider: "google".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate".to_string(),
            requires_api_key: false,
        }
    }
}
