use axum::extract::{DefaultBodyLimit, State};
use axum::response::{Html, Redirect};
use axum_extra::extract::{Form, Query};
use tracing::instrument;

use crate::error::AppError;
use crate::models::submission::{DeleteForm, FeedQuery, SubmitForm};
use crate::render;
use crate::service;
use crate::state::AppState;
use crate::utils::csrf;

/// Room for several inline screenshots in one submission.
pub fn submit_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(16 * 1024 * 1024) // 16 MB
}

/// `GET /`: the feed and the submission form.
#[instrument(skip(state, query), fields(workshop = query.w.as_deref().unwrap_or("")))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Html<String>, AppError> {
    let workshop = query.w.as_deref().map(str::trim).filter(|w| !w.is_empty());
    let submissions = service::handle_list(&state.db, workshop).await?;
    let token = csrf::issue(state.csrf.as_ref())?;

    Ok(Html(render::feed_page(
        &submissions,
        workshop,
        token.as_deref(),
    )))
}

/// `POST /submit`: create a submission, then back to the feed.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<Redirect, AppError> {
    csrf::verify(state.csrf.as_ref(), form.csrf_token.as_deref())?;

    let location = service::handle_create(&state.db, &form).await?;
    Ok(Redirect::to(&location))
}

/// `POST /delete`: delete a submission, then back to the feed.
#[instrument(skip(state, form), fields(id = form.id.as_deref().unwrap_or("")))]
pub async fn delete(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    csrf::verify(state.csrf.as_ref(), form.csrf_token.as_deref())?;

    let location =
        service::handle_delete(&state.db, form.id.as_deref(), form.workshop.as_deref()).await?;
    Ok(Redirect::to(&location))
}
