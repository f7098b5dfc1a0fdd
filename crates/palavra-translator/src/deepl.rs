use async_trait::async_trait;
use serde_json::json;

use crate::http::read_json;
use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

/// DeepL v2 `/translate`, one word per request
#[derive(Clone)]
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeepLTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }
}

pub(crate) fn request_body(text: &str, from: &str, to: &str) -> serde_json::Value {
    json!({
        "text": [text],
        "source_lang": from.to_uppercase(),
        "target_lang": to.to_uppercase(),
    })
}

/// Body shape: `{"translations": [{"detected_source_language": "PT", "text": "house"}]}`
pub(crate) fn parse_response(json: &serde_json::Value) -> Result<String, TranslateError> {
    let first = json
        .get("translations")
        .and_then(|t| t.as_array())
        .and_then(|t| t.first())
        .ok_or_else(|| TranslateError::ApiError("Missing translations array".to_string()))?;

    let text = first
        .get("text")
        .and_then(|t| t.as_str())
        .unwrap_or_default()
        .trim();
    if text.is_empty() {
        return Err(TranslateError::EmptyResult);
    }

    Ok(text.to_string())
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.trim().is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let response = self
            .client
            .post(&self.api_url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("DeepL-Auth-Key {}", self.api_key),
            )
            .json(&request_body(text, &from, &to))
            .send()
            .await?;

        let body = read_json(response).await?;

        Ok(Translation {
            text: parse_response(&body)?,
            from,
            to,
            provider: "deepl".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
        }
    }
}
