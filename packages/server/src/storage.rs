use chrono::Utc;
use sea_orm::*;
use thiserror::Error;
use tracing::debug;

use crate::entity::{submission, submission_image};
use crate::models::submission::{ImageAttachment, ImageSource, NewSubmission, SubmissionRecord};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Insert a submission row and return its generated id.
pub async fn insert_submission<C: ConnectionTrait>(
    db: &C,
    new: NewSubmission,
) -> Result<i32, StorageError> {
    let row = submission::ActiveModel {
        name: Set(new.name),
        prompt: Set(new.prompt),
        result: Set(new.result),
        workshop: Set(new.workshop),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let model = row.insert(db).await?;
    Ok(model.id)
}

/// Attach one image to an existing submission.
pub async fn insert_image<C: ConnectionTrait>(
    db: &C,
    submission_id: i32,
    source: ImageSource,
) -> Result<(), StorageError> {
    let (image_data_url, image_url) = match source {
        ImageSource::Inline(data) => (Some(data), None),
        ImageSource::Remote(url) => (None, Some(url)),
    };

    let row = submission_image::ActiveModel {
        submission_id: Set(submission_id),
        image_data_url: Set(image_data_url),
        image_url: Set(image_url),
        ..Default::default()
    };

    submission_image::Entity::insert(row)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

fn filtered(workshop: Option<&str>) -> Select<submission::Entity> {
    let select = submission::Entity::find();
    match workshop {
        Some(w) => select.filter(submission::Column::Workshop.eq(w)),
        None => select,
    }
}

/// Newest submissions first, at most `limit`, each with its images in
/// insertion order.
pub async fn list_submissions<C: ConnectionTrait>(
    db: &C,
    workshop: Option<&str>,
    limit: u64,
) -> Result<Vec<SubmissionRecord>, StorageError> {
    let rows = filtered(workshop)
        .order_by_desc(submission::Column::Id)
        .limit(Some(limit))
        .all(db)
        .await?;

    // One image query per submission; fine at feed page size.
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let images = list_images(db, row.id).await?;
        records.push(SubmissionRecord::from_model(row, images));
    }

    Ok(records)
}

/// Images of one submission, oldest first.
pub async fn list_images<C: ConnectionTrait>(
    db: &C,
    submission_id: i32,
) -> Result<Vec<ImageAttachment>, StorageError> {
    let images = submission_image::Entity::find()
        .filter(submission_image::Column::SubmissionId.eq(submission_id))
        .order_by_asc(submission_image::Column::Id)
        .all(db)
        .await?;

    Ok(images.into_iter().map(ImageAttachment::from).collect())
}

/// Delete a submission and its images. Unknown ids are ignored.
pub async fn delete_submission<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), StorageError> {
    // Children go first even though the foreign key cascades.
    let images = submission_image::Entity::delete_many()
        .filter(submission_image::Column::SubmissionId.eq(id))
        .exec(db)
        .await?;
    let parent = submission::Entity::delete_by_id(id).exec(db).await?;

    debug!(
        submission_id = id,
        rows = parent.rows_affected,
        images = images.rows_affected,
        "Deleted submission"
    );
    Ok(())
}

/// Number of stored submissions, optionally within one workshop.
pub async fn count_submissions<C: ConnectionTrait>(
    db: &C,
    workshop: Option<&str>,
) -> Result<u64, StorageError> {
    Ok(filtered(workshop).count(db).await?)
}

/// Number of stored image rows belonging to `submission_id`.
pub async fn count_images<C: ConnectionTrait>(
    db: &C,
    submission_id: i32,
) -> Result<u64, StorageError> {
    let count = submission_image::Entity::find()
        .filter(submission_image::Column::SubmissionId.eq(submission_id))
        .count(db)
        .await?;
    Ok(count)
}
