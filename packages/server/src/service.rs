//! Submission workflow between the HTTP handlers and storage.
//!
//! Validation problems never surface as errors here: bad input turns into a
//! no-op and the caller is sent back to the feed. Only storage failures
//! propagate.

use common::limits::{FEED_PAGE_SIZE, NAME_MAX_CHARS, PROMPT_MAX_CHARS, RESULT_MAX_CHARS};
use common::{accept_inline_image, feed_location, normalize_optional, normalize_required};
use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::models::submission::{ImageSource, NewSubmission, SubmissionRecord, SubmitForm};
use crate::storage::{self, StorageError};

/// A create request after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSubmission {
    pub submission: NewSubmission,
    pub images: Vec<ImageSource>,
}

/// Normalize a raw submit form.
///
/// Returns the workshop tag (for the redirect) and, when every required
/// field survived, the rows to insert.
pub fn prepare(form: &SubmitForm) -> (Option<String>, Option<PreparedSubmission>) {
    let workshop = normalize_optional(form.workshop.as_deref());

    let name = normalize_required(form.name.as_deref(), NAME_MAX_CHARS);
    let prompt = normalize_required(form.prompt.as_deref(), PROMPT_MAX_CHARS);
    let result = normalize_required(form.result.as_deref(), RESULT_MAX_CHARS);

    if name.is_empty() || prompt.is_empty() || result.is_empty() {
        return (workshop, None);
    }

    let mut images: Vec<ImageSource> = form
        .image_data_url
        .iter()
        .filter_map(|raw| accept_inline_image(raw))
        .map(|img| ImageSource::Inline(img.into_inner()))
        .collect();
    if let Some(url) = normalize_optional(form.image_url.as_deref()) {
        images.push(ImageSource::Remote(url));
    }

    let prepared = PreparedSubmission {
        submission: NewSubmission {
            name,
            prompt,
            result,
            workshop: workshop.clone(),
        },
        images,
    };
    (workshop, Some(prepared))
}

/// Create a submission from a raw form and return where to redirect.
pub async fn handle_create<C: ConnectionTrait>(
    db: &C,
    form: &SubmitForm,
) -> Result<String, StorageError> {
    let (workshop, prepared) = prepare(form);
    let location = feed_location(workshop.as_deref());

    let Some(prepared) = prepared else {
        debug!("Dropping submission with missing required fields");
        return Ok(location);
    };

    // Not atomic: a failure after this insert leaves the submission without
    // some of its images.
    let id = storage::insert_submission(db, prepared.submission).await?;
    let image_count = prepared.images.len();
    for image in prepared.images {
        storage::insert_image(db, id, image).await?;
    }

    info!(
        submission_id = id,
        workshop = workshop.as_deref().unwrap_or(""),
        images = image_count,
        "Submission created"
    );
    Ok(location)
}

/// Delete by a raw id string and return where to redirect.
pub async fn handle_delete<C: ConnectionTrait>(
    db: &C,
    raw_id: Option<&str>,
    workshop: Option<&str>,
) -> Result<String, StorageError> {
    let workshop = normalize_optional(workshop);
    let location = feed_location(workshop.as_deref());

    let Some(id) = raw_id.and_then(|raw| raw.trim().parse::<i32>().ok()) else {
        debug!(raw_id = raw_id.unwrap_or(""), "Ignoring delete with invalid id");
        return Ok(location);
    };

    storage::delete_submission(db, id).await?;
    info!(submission_id = id, "Submission deleted");
    Ok(location)
}

/// The feed page: newest first, one page, optionally one workshop.
pub async fn handle_list<C: ConnectionTrait>(
    db: &C,
    workshop: Option<&str>,
) -> Result<Vec<SubmissionRecord>, StorageError> {
    let workshop = workshop.map(str::trim).filter(|w| !w.is_empty());
    storage::list_submissions(db, workshop, FEED_PAGE_SIZE).await
}
