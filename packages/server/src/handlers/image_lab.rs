use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::Html;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::gateway::{self, ReferenceImage};
use crate::models::image_lab::{GenerateForm, LabFormEcho, parse_count, parse_prompts_json};
use crate::render;
use crate::state::AppState;
use crate::utils::csrf;

pub fn generate_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(32 * 1024 * 1024) // 32 MB
}

fn ensure_enabled(state: &AppState) -> Result<(), AppError> {
    if state.config.image_lab.enabled {
        Ok(())
    } else {
        Err(AppError::NotFound("Image lab is disabled".into()))
    }
}

/// `GET /image-lab`
#[instrument(skip(state))]
pub async fn page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    ensure_enabled(&state)?;
    let token = csrf::issue(state.csrf.as_ref())?;
    let echo = LabFormEcho {
        count: 1,
        prompts: Vec::new(),
    };
    Ok(Html(render::image_lab_page(&[], &echo, token.as_deref())))
}

/// `POST /image-lab/generate`: run the prompts and render the results inline.
#[instrument(skip(state, multipart))]
pub async fn generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    ensure_enabled(&state)?;

    let form = read_generate_form(multipart).await?;
    csrf::verify(state.csrf.as_ref(), form.csrf_token.as_deref())?;

    let outcomes = gateway::generate(
        state.generator.as_ref(),
        &form.prompts,
        form.count,
        form.reference.as_ref(),
        form.api_key.as_deref(),
    )
    .await;

    info!(
        prompts = form.prompts.len(),
        count = form.count,
        results = outcomes.len(),
        "Image lab run finished"
    );

    let token = csrf::issue(state.csrf.as_ref())?;
    let echo = LabFormEcho {
        count: gateway::clamp_count(form.count),
        prompts: form.prompts,
    };
    Ok(Html(render::image_lab_page(
        &outcomes,
        &echo,
        token.as_deref(),
    )))
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))
}

/// Collect the multipart fields. `prompts_json` wins over the plain
/// one-per-line `prompts` textarea when both are sent.
async fn read_generate_form(mut multipart: Multipart) -> Result<GenerateForm, AppError> {
    let mut form = GenerateForm {
        count: 1,
        ..Default::default()
    };
    let mut prompts_json: Option<String> = None;
    let mut prompts_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("api_key") => {
                let key = field_text(field).await?;
                form.api_key = Some(key.trim().to_string()).filter(|k| !k.is_empty());
            }
            Some("count") => form.count = parse_count(&field_text(field).await?)?,
            Some("prompts_json") => prompts_json = Some(field_text(field).await?),
            Some("prompts") => prompts_text = Some(field_text(field).await?),
            Some("csrf_token") => form.csrf_token = Some(field_text(field).await?),
            Some("reference_image") => form.reference = read_reference(field).await?,
            _ => {} // Ignore unknown fields.
        }
    }

    form.prompts = match prompts_json.filter(|j| !j.trim().is_empty()) {
        Some(json) => parse_prompts_json(&json)?,
        None => prompts_text
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
    };

    Ok(form)
}

/// An empty file input yields `None`; anything not an image is rejected.
async fn read_reference(
    field: axum::extract::multipart::Field<'_>,
) -> Result<Option<ReferenceImage>, AppError> {
    let declared = field
        .content_type()
        .map(|s| s.to_string())
        .filter(|ct| ct != "application/octet-stream");
    let guessed = field
        .file_name()
        .and_then(|name| mime_guess::from_path(name).first())
        .map(|m| m.to_string());

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read reference image: {e}")))?;
    if bytes.is_empty() {
        return Ok(None);
    }

    let mime_type = declared.or(guessed).unwrap_or_default();
    if !mime_type.starts_with("image/") {
        return Err(AppError::Validation(
            "Reference image must be an image file".into(),
        ));
    }

    Ok(Some(ReferenceImage {
        mime_type,
        bytes: bytes.to_vec(),
    }))
}
