use std::time::Duration;

use palavra_config::Provider;
use palavra_config::translator::TranslatorConfig;

use crate::{DeepLTranslator, GoogleTranslator, LanguageCode, TranslateError, Translator};

/// Why a lookup produced no usable translation
#[derive(Debug, thiserror::Error)]
pub enum ResolutionFailure {
    #[error("no translation provider configured")]
    Offline,

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Provider(#[from] TranslateError),
}

/// Best-effort, single-attempt translation lookup.
///
/// Every failure mode is folded into [`ResolutionFailure`]; nothing escapes as a
/// panic and no retries are made here.
pub struct Resolver {
    translator: Option<Box<dyn Translator>>,
    from: LanguageCode,
    to: LanguageCode,
    timeout: Duration,
}

impl Resolver {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(translator: Box<dyn Translator>, from: LanguageCode, to: LanguageCode) -> Self {
        Self {
            translator: Some(translator),
            from,
            to,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Resolver that always fails, sending every unseen word to manual entry
    pub fn offline(from: LanguageCode, to: LanguageCode) -> Self {
        Self {
            translator: None,
            from,
            to,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &TranslatorConfig) -> Self {
        let from = config.from_lang.clone();
        let to = config.to_lang.clone();

        let resolver = match config.provider {
            Provider::Google => Self::new(Box::new(GoogleTranslator::new()), from, to),
            Provider::Deepl => {
                if config.api_key.is_empty() {
                    tracing::warn!("DeepL selected without an API key, running offline");
                    Self::offline(from, to)
                } else {
                    let translator =
                        DeepLTranslator::new(config.api_key.clone(), config.api_url.clone());
                    Self::new(Box::new(translator), from, to)
                }
            }
            Provider::None => Self::offline(from, to),
        };

        resolver.with_timeout(config.timeout())
    }

    pub fn is_offline(&self) -> bool {
        self.translator.is_none()
    }

    pub async fn resolve(&self, word: &str) -> Result<String, ResolutionFailure> {
        let result = self.attempt(word).await;
        match &result {
            Ok(text) => tracing::debug!("Resolved '{}' -> '{}'", word, text),
            Err(e) => tracing::warn!("Could not resolve '{}': {}", word, e),
        }
        result
    }

    async fn attempt(&self, word: &str) -> Result<String, ResolutionFailure> {
        let translator = self.translator.as_ref().ok_or(ResolutionFailure::Offline)?;

        let lookup = translator.translate(word, self.from.clone(), self.to.clone());
        let translation = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| ResolutionFailure::Timeout(self.timeout))??;

        let text = translation.text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyResult.into());
        }

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::{ProviderMetadata, Translation};

    struct Scripted {
        answers: HashMap<&'static str, &'static str>,
        delay: Duration,
    }

    #[async_trait]
    impl Translator for Scripted {
        async fn translate(
            &self,
            text: &str,
            from: LanguageCode,
            to: LanguageCode,
        ) -> Result<Translation, TranslateError> {
            tokio::time::sleep(self.delay).await;
            let answer = self
                .answers
                .get(text)
                .ok_or_else(|| TranslateError::ApiError("unknown word".to_string()))?;
            Ok(Translation {
                text: answer.to_string(),
                from,
                to,
                provider: "scripted".to_string(),
            })
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "scripted".to_string(),
                requires_api_key: false,
            }
        }
    }

    fn resolver(answers: &[(&'static str, &'static str)], delay: Duration) -> Resolver {
        let translator = Scripted {
            answers: answers.iter().copied().collect(),
            delay,
        };
        Resolver::new(Box::new(translator), "pt".into(), "en".into())
    }

    #[tokio::test]
    async fn test_resolve_trims_provider_text() {
        let resolver = resolver(&[("casa", "  house ")], Duration::ZERO);
        assert_eq!(resolver.resolve("casa").await.unwrap(), "house");
    }

    #[tokio::test]
    async fn test_provider_error_becomes_failure() {
        let resolver = resolver(&[], Duration::ZERO);
        assert!(matches!(
            resolver.resolve("rio").await,
            Err(ResolutionFailure::Provider(TranslateError::ApiError(_)))
        ));
    }

    #[tokio::test]
    async fn test_blank_translation_is_failure() {
        let resolver = resolver(&[("nada", "   ")], Duration::ZERO);
        assert!(matches!(
            resolver.resolve("nada").await,
            Err(ResolutionFailure::Provider(TranslateError::EmptyResult))
        ));
    }

    #[tokio::test]
    async fn test_hang_maps_to_timeout() {
        let resolver = resolver(&[("casa", "house")], Duration::from_secs(5))
            .with_timeout(Duration::from_millis(20));
        assert!(matches!(
            resolver.resolve("casa").await,
            Err(ResolutionFailure::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_offline_always_fails() {
        let resolver = Resolver::offline("pt".into(), "en".into());
        assert!(resolver.is_offline());
        assert!(matches!(
            resolver.resolve("casa").await,
            Err(ResolutionFailure::Offline)
        ));
    }

    #[test]
    fn test_deepl_without_key_runs_offline() {
        let config = TranslatorConfig {
            provider: Provider::Deepl,
            ..TranslatorConfig::default()
        };
        assert!(Resolver::from_config(&config).is_offline());
    }
}
