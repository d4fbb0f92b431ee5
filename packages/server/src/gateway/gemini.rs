use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GatewayError, GeneratedImage, GenerationRequest, ImageGenerator};
use crate::config::ImageLabConfig;

/// Environment variables consulted when neither the request nor the config
/// carries a key.
const AMBIENT_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Google Gemini `generateContent` client requesting image output.
pub struct GeminiGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiGenerator {
    pub fn new(config: &ImageLabConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn resolve_key(&self, per_request: Option<&str>) -> Option<String> {
        per_request
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| self.api_key.clone())
            .or_else(|| {
                AMBIENT_KEY_VARS
                    .iter()
                    .filter_map(|var| std::env::var(var).ok())
                    .find(|v| !v.trim().is_empty())
            })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineData,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 2],
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

fn build_request<'a>(request: &GenerationRequest<'a>) -> GenerateContentRequest<'a> {
    let mut parts = vec![Part::Text {
        text: request.prompt,
    }];
    if let Some(reference) = request.reference {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: reference.mime_type.clone(),
                data: STANDARD.encode(&reference.bytes),
            },
        });
    }

    GenerateContentRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_modalities: ["TEXT", "IMAGE"],
        },
    }
}

/// First inline image in the response, decoded.
fn first_image(response: GenerateContentResponse) -> Result<Option<GeneratedImage>, GatewayError> {
    let inline = response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.inline_data);

    let Some(inline) = inline else {
        return Ok(None);
    };

    let bytes = STANDARD
        .decode(inline.data.as_bytes())
        .map_err(|e| GatewayError::Decode(e.to_string()))?;
    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(GeneratedImage {
        mime_type: inline.mime_type,
        bytes,
    }))
}

#[async_trait]
impl ImageGenerator for GeminiGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> Result<Option<GeneratedImage>, GatewayError> {
        let key = self
            .resolve_key(request.api_key)
            .ok_or(GatewayError::MissingApiKey)?;

        let res = self
            .client
            .post(self.url())
            .header("x-goog-api-key", key)
            .json(&build_request(request))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(GatewayError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = res.json().await?;
        debug!(candidates = body.candidates.len(), "Image service responded");
        first_image(body)
    }
}
