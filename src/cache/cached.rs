use async_trait::async_trait;

use super::{CacheKey, CacheManager};
use crate::error::Result;
use crate::translation::{TargetLanguage, Translator};

/// Serves repeated values from the SQLite cache and stores fresh translations.
///
/// Cache failures only produce a warning; the backend result is what counts.
pub struct CachedTranslator<T> {
    inner: T,
    cache: CacheManager,
    scope: String,
}

impl<T: Translator> CachedTranslator<T> {
    pub const fn new(inner: T, cache: CacheManager, scope: String) -> Self {
        Self {
            inner,
            cache,
            scope,
        }
    }
}

#[async_trait]
impl<T: Translator> Translator for CachedTranslator<T> {
    async fn translate(&self, language: &TargetLanguage, text: &str) -> Result<String> {
        let key = CacheKey {
            source_text: text,
            target_language: language.tag(),
            scope: &self.scope,
        };

        match self.cache.get(&key) {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => crate::warn!("Warning: translation cache unavailable: {e:#}"),
        }

        let translated = self.inner.translate(language, text).await?;

        if let Err(e) = self.cache.put(&key, &translated) {
            crate::warn!("Warning: failed to store translation in cache: {e:#}");
        }

        Ok(translated)
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
