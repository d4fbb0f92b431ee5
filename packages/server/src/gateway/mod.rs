//! Image generation through an external service.
//!
//! The HTTP-facing code only sees [`generate`], which never fails as a
//! whole: every (prompt, attempt) pair becomes one [`GenerationOutcome`].

mod gemini;

use async_trait::async_trait;
use common::encode_data_url;
use common::limits::{GENERATION_MAX_COUNT, GENERATION_MIN_COUNT};
use thiserror::Error;
use tracing::{instrument, warn};

pub use gemini::GeminiGenerator;

/// Message recorded when the service answers without image data.
pub const NO_IMAGE_RETURNED: &str = "No image returned";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no API key provided and none configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("image service returned {status}: {message}")]
    Service { status: u16, message: String },
    #[error("invalid image data in response: {0}")]
    Decode(String),
}

/// An image supplied alongside the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// A single call to the image service.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub reference: Option<&'a ReferenceImage>,
    /// Per-call key; the generator's own key resolution applies when `None`.
    pub api_key: Option<&'a str>,
}

/// Raw image bytes returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Something that turns a prompt into an image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// `Ok(None)` means the service answered but sent no image.
    async fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> Result<Option<GeneratedImage>, GatewayError>;
}

/// Result of one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { prompt: String, data_url: String },
    Failure { prompt: String, error: String },
}

impl GenerationOutcome {
    pub fn prompt(&self) -> &str {
        match self {
            Self::Success { prompt, .. } | Self::Failure { prompt, .. } => prompt,
        }
    }
}

/// Clamp a requested per-prompt count into the supported range.
pub fn clamp_count(count: u32) -> u32 {
    count.clamp(GENERATION_MIN_COUNT, GENERATION_MAX_COUNT)
}

/// Run every prompt `count` times, sequentially, in prompt-major order.
///
/// Blank prompts are skipped.
#[instrument(skip(generator, prompts, reference, api_key), fields(prompts = prompts.len()))]
pub async fn generate(
    generator: &dyn ImageGenerator,
    prompts: &[String],
    count: u32,
    reference: Option<&ReferenceImage>,
    api_key: Option<&str>,
) -> Vec<GenerationOutcome> {
    let count = clamp_count(count);
    let mut outcomes = Vec::new();

    for prompt in prompts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        for attempt in 0..count {
            let request = GenerationRequest {
                prompt,
                reference,
                api_key,
            };
            let outcome = match generator.generate(&request).await {
                Ok(Some(image)) => GenerationOutcome::Success {
                    prompt: prompt.to_string(),
                    data_url: encode_data_url(&image.mime_type, &image.bytes),
                },
                Ok(None) => GenerationOutcome::Failure {
                    prompt: prompt.to_string(),
                    error: NO_IMAGE_RETURNED.to_string(),
                },
                Err(e) => {
                    warn!(error = %e, attempt, "Image generation failed");
                    GenerationOutcome::Failure {
                        prompt: prompt.to_string(),
                        error: e.to_string(),
                    }
                }
            };
            outcomes.push(outcome);
        }
    }

    outcomes
}
