//! Streaming client for a local Ollama server.
//!
//! `POST {host}/api/generate` with `stream: true` answers with one JSON
//! object per line. Each carries a `response` fragment; the last one has
//! `done: true`. Fragments are forwarded as they arrive.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerateError;

/// A model that turns a prompt into text, reporting fragments as they stream.
pub trait ModelClient {
    /// Generate a completion for `prompt`.
    ///
    /// `on_chunk` sees every fragment in order; the returned string is
    /// their concatenation.
    fn generate(
        &self,
        prompt: &str,
        on_chunk: &mut (dyn FnMut(&str) + Send),
    ) -> impl Future<Output = Result<String, GenerateError>> + Send;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// One line of the `/api/generate` stream.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct GenerateChunk {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Splits a byte stream into newline-delimited JSON chunks.
#[derive(Debug, Default)]
pub struct NdjsonDecoder {
    buffer: Vec<u8>,
}

impl NdjsonDecoder {
    /// Feed raw bytes; returns every chunk completed by them.
    ///
    /// # Errors
    /// Returns [`GenerateError::Parse`] for a line that is not a chunk.
    pub fn push(&mut self, bytes: &[u8]) -> Result<Vec<GenerateChunk>, GenerateError> {
        self.buffer.extend_from_slice(bytes);
        let mut chunks = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(chunk) = parse_line(&line)? {
                chunks.push(chunk);
            }
        }
        Ok(chunks)
    }

    /// Parse whatever is left once the stream has ended.
    ///
    /// # Errors
    /// Returns [`GenerateError::Parse`] if the trailing bytes are not a chunk.
    pub fn finish(mut self) -> Result<Option<GenerateChunk>, GenerateError> {
        let rest = std::mem::take(&mut self.buffer);
        parse_line(&rest)
    }
}

fn parse_line(line: &[u8]) -> Result<Option<GenerateChunk>, GenerateError> {
    let text = String::from_utf8_lossy(line);
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| GenerateError::Parse(format!("{e}: {text}")))
}

/// HTTP client for Ollama's generate endpoint.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a client for `model` served at `base_url`.
    ///
    /// # Errors
    /// Returns [`GenerateError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("klara/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

impl ModelClient for OllamaClient {
    async fn generate(
        &self,
        prompt: &str,
        on_chunk: &mut (dyn FnMut(&str) + Send),
    ) -> Result<String, GenerateError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: true,
        };
        debug!(model = %self.model, url = %self.endpoint(), "requesting generation");
        let mut resp = self.http.post(self.endpoint()).json(&body).send().await?;

        if !resp.status().is_success() {
            return Err(GenerateError::Api {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let mut decoder = NdjsonDecoder::default();
        let mut output = String::new();
        let mut forward = |chunk: GenerateChunk| -> Result<(), GenerateError> {
            if let Some(message) = chunk.error {
                return Err(GenerateError::Api {
                    status: 200,
                    message,
                });
            }
            if !chunk.response.is_empty() {
                on_chunk(&chunk.response);
                output.push_str(&chunk.response);
            }
            Ok(())
        };

        while let Some(bytes) = resp.chunk().await? {
            for chunk in decoder.push(&bytes)? {
                forward(chunk)?;
            }
        }
        if let Some(chunk) = decoder.finish()? {
            forward(chunk)?;
        }

        debug!(bytes = output.len(), "generation finished");
        Ok(output)
    }
}
