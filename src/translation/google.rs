use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{TargetLanguage, Translator};
use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: [&'a str; 1],
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Translates values with the Google Cloud Translation v2 REST API.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleTranslator {
    pub const fn new(client: Client, endpoint: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/language/translate/v2",
            self.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, language: &TargetLanguage, text: &str) -> Result<String> {
        // Nothing to translate; no request is sent.
        if text.is_empty() {
            return Ok(String::new());
        }

        let url = self.url();
        let request = TranslateRequest {
            q: [text],
            target: language.tag(),
            format: "text",
        };

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                Error::TranslationFailed(format!("Failed to connect to API endpoint: {url}: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TranslationFailed(format!(
                "API request failed with status {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::TranslationFailed(format!("Failed to read API response: {e}")))?;

        first_translation(&body, text)
    }
}

fn first_translation(body: &str, text: &str) -> Result<String> {
    let parsed: TranslateResponse = serde_json::from_str(body)
        .map_err(|e| Error::TranslationFailed(format!("Failed to parse API response: {e}")))?;

    parsed
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or_else(|| Error::EmptyTranslationResponse {
            text: text.to_string(),
        })
}
