use super::{TargetLanguage, Translator};
use crate::error::{Error, Result};

/// Owns the target language and the backend for one run.
///
/// A service is either ready (it holds a backend) or closed. There is no way back from closed.
pub struct TranslationService {
    language: TargetLanguage,
    backend: Option<Box<dyn Translator>>,
}

impl TranslationService {
    /// Validates `target_language`, then establishes the backend with `connect`.
    ///
    /// The language is checked first, so an invalid tag never touches the backend.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLanguageTag`] for a malformed tag, or whatever `connect` returns
    /// (normally [`Error::BackendUnavailable`]).
    pub fn open<F>(target_language: &str, connect: F) -> Result<Self>
    where
        F: FnOnce(&TargetLanguage) -> Result<Box<dyn Translator>>,
    {
        let language = TargetLanguage::parse(target_language)?;
        let backend = connect(&language)?;
        Ok(Self {
            language,
            backend: Some(backend),
        })
    }

    /// Creates a service around an already built backend.
    pub fn new<T>(target_language: &str, backend: T) -> Result<Self>
    where
        T: Translator + 'static,
    {
        Self::open(target_language, |_| Ok(Box::new(backend)))
    }

    pub const fn language(&self) -> &TargetLanguage {
        &self.language
    }

    pub const fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    /// Translates a single value into the service's language.
    pub async fn translate(&self, text: &str) -> Result<String> {
        let backend = self.backend.as_ref().ok_or(Error::ServiceClosed)?;
        backend.translate(&self.language, text).await
    }

    /// Closes the backend. Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.close();
        }
    }
}

impl Drop for TranslationService {
    fn drop(&mut self) {
        self.close();
    }
}
