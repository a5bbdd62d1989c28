//! In-memory translator for tests and offline runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::{TargetLanguage, Translator};
use crate::error::{Error, Result};

type TranslateFn = dyn Fn(&TargetLanguage, &str) -> Result<String> + Send + Sync;

/// A [`Translator`] driven by a closure. Every call is recorded.
pub struct MemoryTranslator {
    translate: Box<TranslateFn>,
    calls: Mutex<Vec<String>>,
    closed: Arc<AtomicBool>,
}

impl MemoryTranslator {
    pub fn new<F>(translate: F) -> Self
    where
        F: Fn(&TargetLanguage, &str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            translate: Box::new(translate),
            calls: Mutex::new(Vec::new()),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns every value unchanged.
    pub fn identity() -> Self {
        Self::new(|_, text| Ok(text.to_string()))
    }

    /// Looks values up in `entries`; unknown values fail with [`Error::TranslationFailed`].
    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries: HashMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(move |_, text| {
            entries
                .get(text)
                .cloned()
                .ok_or_else(|| Error::TranslationFailed(format!("no translation for '{text}'")))
        })
    }

    /// Fails every call with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_, _| Err(Error::TranslationFailed(message.clone())))
    }

    /// Values passed to [`Translator::translate`], in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Flag set once [`Translator::close`] has run.
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

#[async_trait]
impl Translator for MemoryTranslator {
    async fn translate(&self, language: &TargetLanguage, text: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        (self.translate)(language, text)
    }

    fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
