use async_trait::async_trait;

use super::TargetLanguage;
use crate::error::Result;

/// A capability that translates one text value into a target language.
///
/// Implementations own whatever connection they need. They are handed to a
/// [`TranslationService`](super::TranslationService) at construction, so the line
/// processor never knows which provider it talks to.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` into `language`.
    ///
    /// `text` may be empty and may contain any characters, including quotes.
    async fn translate(&self, language: &TargetLanguage, text: &str) -> Result<String>;

    /// Releases held resources. Called at most once by the owning service.
    fn close(&mut self) {}
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Box<T> {
    async fn translate(&self, language: &TargetLanguage, text: &str) -> Result<String> {
        (**self).translate(language, text).await
    }

    fn close(&mut self) {
        (**self).close();
    }
}
