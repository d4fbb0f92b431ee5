use common::limits::{GENERATION_MAX_COUNT, GENERATION_MIN_COUNT};

use crate::error::AppError;
use crate::gateway::ReferenceImage;

/// Parsed `/image-lab/generate` multipart body.
#[derive(Debug, Default)]
pub struct GenerateForm {
    pub api_key: Option<String>,
    pub count: u32,
    pub prompts: Vec<String>,
    pub reference: Option<ReferenceImage>,
    pub csrf_token: Option<String>,
}

/// Decode `prompts_json`, a JSON array of prompt strings.
pub fn parse_prompts_json(raw: &str) -> Result<Vec<String>, AppError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let prompts: Vec<String> = serde_json::from_str(raw)
        .map_err(|e| AppError::Validation(format!("prompts_json must be a list of strings: {e}")))?;
    Ok(prompts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect())
}

/// Parse the `count` field, defaulting to one image per prompt. Any integer
/// is accepted and clamped into the supported range.
pub fn parse_count(raw: &str) -> Result<u32, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(GENERATION_MIN_COUNT);
    }
    let count = raw
        .parse::<i64>()
        .map_err(|_| AppError::Validation("count must be a number between 1 and 4".into()))?;
    let clamped = count.clamp(GENERATION_MIN_COUNT.into(), GENERATION_MAX_COUNT.into());
    Ok(u32::try_from(clamped).unwrap_or(GENERATION_MIN_COUNT))
}

/// Values shown back in the lab form after a run.
#[derive(Debug, Clone, Default)]
pub struct LabFormEcho {
    pub count: u32,
    pub prompts: Vec<String>,
}
