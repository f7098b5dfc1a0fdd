use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use palavra_translator::{
    LanguageCode, ProviderMetadata, Resolver, TranslateError, Translation, Translator,
};

/// Answers from a fixed table; anything else is an API failure
pub struct ScriptedTranslator {
    answers: HashMap<String, String>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answers.get(text) {
            Some(answer) => Ok(Translation {
                text: answer.clone(),
                from,
                to,
                provider: "scripted".to_string(),
            }),
            None => Err(TranslateError::ApiError("offline".to_string())),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".to_string(),
            requires_api_key: false,
        }
    }
}

/// Resolver backed by `answers`, plus a counter of lookups made
pub fn scripted_resolver(answers: &[(&str, &str)]) -> (Resolver, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let translator = ScriptedTranslator {
        answers: answers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        calls: calls.clone(),
    };
    (
        Resolver::new(Box::new(translator), "pt".into(), "en".into()),
        calls,
    )
}
