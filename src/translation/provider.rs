//! Builds the configured backend.

use reqwest::Client;
use sha2::{Digest, Sha256};
use std::time::Duration;

use super::prompt::SYSTEM_PROMPT_TEMPLATE;
use super::{ChatTranslator, GoogleTranslator, Translator};
use crate::cache::{CacheManager, CachedTranslator};
use crate::config::{ProviderKind, ResolvedConfig};
use crate::error::{Error, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Creates the backend described by `config`, wrapped in the translation cache when
/// `use_cache` is set.
///
/// The HTTP client is built here, once per run; a failure is [`Error::BackendUnavailable`].
/// An unusable cache only produces a warning.
pub fn connect(config: &ResolvedConfig, use_cache: bool) -> Result<Box<dyn Translator>> {
    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!("qtl/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::BackendUnavailable(format!("Failed to create HTTP client: {e}")))?;

    let backend: Box<dyn Translator> = match config.kind {
        ProviderKind::Google => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                Error::BackendUnavailable(format!(
                    "Provider '{}' requires an API key",
                    config.provider_name
                ))
            })?;
            Box::new(GoogleTranslator::new(client, config.endpoint.clone(), api_key))
        }
        ProviderKind::OpenAi => {
            let model = config.model.clone().ok_or_else(|| {
                Error::BackendUnavailable(format!(
                    "Provider '{}' requires a model",
                    config.provider_name
                ))
            })?;
            Box::new(ChatTranslator::new(
                client,
                config.endpoint.clone(),
                model,
                config.api_key.clone(),
            ))
        }
    };

    if !use_cache {
        return Ok(backend);
    }

    match CacheManager::new() {
        Ok(cache) => Ok(Box::new(CachedTranslator::new(
            backend,
            cache,
            backend_scope(config),
        ))),
        Err(e) => {
            crate::warn!("Warning: translation cache disabled: {e:#}");
            Ok(backend)
        }
    }
}

/// Everything besides the value and language that changes what a backend returns.
pub fn backend_scope(config: &ResolvedConfig) -> String {
    match config.kind {
        ProviderKind::Google => format!("google|{}", config.endpoint),
        ProviderKind::OpenAi => {
            let mut hasher = Sha256::new();
            hasher.update(SYSTEM_PROMPT_TEMPLATE.as_bytes());
            format!(
                "openai|{}|{}|{}",
                config.endpoint,
                config.model.as_deref().unwrap_or_default(),
                hex::encode(hasher.finalize())
            )
        }
    }
}
