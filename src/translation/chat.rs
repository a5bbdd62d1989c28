use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::Serialize;
use std::borrow::Cow;

use super::prompt::build_system_prompt;
use super::sse_parser::sse_to_text_stream;
use super::{TargetLanguage, Translator};
use crate::error::{Error, Result};

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

/// Translates values through an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct ChatTranslator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl ChatTranslator {
    pub const fn new(
        client: Client,
        endpoint: String,
        model: String,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint,
            model,
            api_key,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Translator for ChatTranslator {
    async fn translate(&self, language: &TargetLanguage, text: &str) -> Result<String> {
        // Nothing to translate; no request is sent.
        if text.is_empty() {
            return Ok(String::new());
        }

        let url = self.url();
        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Owned(build_system_prompt(&language.describe())),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(text),
                },
            ],
            stream: true,
        };

        let mut http_request = self.client.post(&url).json(&chat_request);

        // Add Authorization header if API key is present
        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request.send().await.map_err(|e| {
            Error::TranslationFailed(format!("Failed to connect to API endpoint: {url}: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TranslationFailed(format!(
                "API request failed with status {status}: {body}"
            )));
        }

        let mut stream = std::pin::pin!(sse_to_text_stream(response.bytes_stream()));
        let mut translated = String::new();
        while let Some(chunk) = stream.next().await {
            translated.push_str(&chunk?);
        }

        if translated.is_empty() {
            return Err(Error::EmptyTranslationResponse {
                text: text.to_string(),
            });
        }

        Ok(translated)
    }
}
