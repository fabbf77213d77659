//! Scripted generator for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationError, TextGenerator};

/// Generator that replays scripted responses and records every call.
///
/// Responses are consumed front-to-back; once the script is exhausted the
/// last response repeats, so a single-response mock behaves like a backend
/// that always says the same thing. Recorded `(prompt, max_tokens)` pairs let
/// tests assert prompt composition.
pub struct MockGenerator {
    responses: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl MockGenerator {
    /// Mock that always returns the same text.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::with_responses(vec![text.into()])
    }

    /// Mock that replays `responses` in order, repeating the last one when
    /// the script runs out. An empty script returns empty text.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let last = responses.last().cloned().unwrap_or_default();
        Self {
            responses: Mutex::new(responses.into()),
            last: Mutex::new(last),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// All `(prompt, max_tokens)` pairs seen so far, in call order.
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((prompt.to_string(), max_tokens));
        }
        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front());
        match next {
            Some(text) => {
                if let Ok(mut last) = self.last.lock() {
                    *last = text.clone();
                }
                Ok(text)
            }
            None => Ok(self.last.lock().map(|l| l.clone()).unwrap_or_default()),
        }
    }
}

/// Generator that fails every call; for exercising fatal-error paths.
pub struct FailingGenerator {
    message: String,
}

impl FailingGenerator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, GenerationError> {
        Err(GenerationError::Backend(self.message.clone()))
    }
}
