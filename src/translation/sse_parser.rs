//! Server-Sent Events parsing for OpenAI-compatible streaming chat completions.

use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// One parsed SSE line.
#[derive(Debug, PartialEq, Eq)]
enum Event {
    Content(String),
    Done,
    Skip,
}

/// Converts a raw SSE byte stream into a stream of text chunks.
///
/// The stream ends at `data: [DONE]`, at the end of the body, or after yielding the first
/// transport error.
pub fn sse_to_text_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer = String::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(Error::TranslationFailed(format!("Stream error: {e}")));
                    return;
                }
            };

            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(line_end) = buffer.find('\n') {
                let line: String = buffer.drain(..=line_end).collect();
                match parse_sse_line(line.trim()) {
                    Event::Content(content) => yield Ok(content),
                    Event::Done => return,
                    Event::Skip => {}
                }
            }
        }

        // Some servers close the body without a trailing newline.
        if let Event::Content(content) = parse_sse_line(buffer.trim()) {
            yield Ok(content);
        }
    }
}

fn parse_sse_line(line: &str) -> Event {
    let Some(data) = line.strip_prefix("data:") else {
        return Event::Skip;
    };
    let data = data.trim_start();
    if data == "[DONE]" {
        return Event::Done;
    }

    let Ok(response) = serde_json::from_str::<StreamResponse>(data) else {
        return Event::Skip;
    };

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if content.is_empty() {
        Event::Skip
    } else {
        Event::Content(content)
    }
}
