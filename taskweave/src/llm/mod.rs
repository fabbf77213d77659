//! Generation-service seam.
//!
//! The engine only needs `generate(prompt, max_tokens) -> text`; everything
//! about model loading, device placement, or sampling lives behind this trait.
//! Implementations: [`MockGenerator`] (scripted, for tests and offline runs)
//! and [`OpenAiGenerator`] (OpenAI-compatible HTTP backend).
//!
//! The call is plain async with no implicit timeout; a caller that wants a
//! deadline wraps the future itself. The backend is assumed to eventually
//! return *some* text for any prompt; only true backend failures return an
//! error, and the engine treats those as fatal for the whole run.

mod mock;
mod openai;

pub use mock::{FailingGenerator, MockGenerator};
pub use openai::OpenAiGenerator;

use async_trait::async_trait;

/// Errors from a text-generation backend.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Transport or service failure (backend unreachable, HTTP error status).
    #[error("generation backend error: {0}")]
    Backend(String),

    /// The backend answered but the response body could not be read as a
    /// completion.
    #[error("invalid generation response: {0}")]
    InvalidResponse(String),
}

/// Text generator: given a prompt and a token budget, returns generated text.
///
/// The returned text may be slow to arrive, non-deterministic, and unrelated
/// to the instruction; callers that expect structure must parse tolerantly.
///
/// **Interaction**: Called once per planning attempt, once per task, and once
/// for synthesis. Shared between phases as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError>;
}
