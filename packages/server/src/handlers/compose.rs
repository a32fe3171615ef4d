use askama::Template;
use axum::extract::{Multipart, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entity::{author, category, document, post, post_author, post_image};
use crate::error::AppError;
use crate::forms::FormErrors;
use crate::forms::post::{ComposeFields, ComposePostForm};
use crate::state::AppState;
use crate::utils::filename::validate_upload_filename;
use crate::utils::image::sniff_image_mime;

/// One `<option>` in a select widget, with its selection state restored
/// from the submitted form on re-render.
struct SelectOption {
    id: i32,
    label: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "compose_form.html")]
struct ComposePage {
    form: ComposePostForm,
    errors: FormErrors,
    categories: Vec<SelectOption>,
    documents: Vec<SelectOption>,
    authors: Vec<SelectOption>,
}

/// A banner file pulled out of the multipart body, before validation.
struct BannerUpload {
    filename: String,
    data: Vec<u8>,
}

/// A banner that passed filename, size and content checks.
struct ValidatedBanner {
    filename: String,
    mime: &'static str,
    data: Vec<u8>,
}

async fn render_compose_form(
    state: &AppState,
    form: ComposePostForm,
    errors: FormErrors,
) -> Result<Html<String>, AppError> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|c| SelectOption {
            selected: form.category_selected(c.id),
            id: c.id,
            label: c.name,
        })
        .collect();

    let documents = document::Entity::find()
        .order_by_asc(document::Column::Title)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|d| SelectOption {
            selected: form.document_selected(d.id),
            id: d.id,
            label: d.title,
        })
        .collect();

    let authors = author::Entity::find()
        .order_by_asc(author::Column::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|a| SelectOption {
            selected: form.author_selected(a.id),
            id: a.id,
            label: a.name,
        })
        .collect();

    let page = ComposePage {
        form,
        errors,
        categories,
        documents,
        authors,
    };
    Ok(Html(page.render()?))
}

#[instrument(skip(state))]
pub async fn compose_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_compose_form(&state, ComposePostForm::default(), FormErrors::default()).await
}

/// Handle the compose form submission: walk the multipart body, validate
/// every field, store the banner image if one was supplied, and insert the
/// post with its author links in a single transaction. Any failure
/// re-renders the form with inline errors and writes nothing.
#[instrument(skip(state, multipart))]
pub async fn create_compose_post(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut form = ComposePostForm::default();
    let mut banner: Option<BannerUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("title") => form.title = Some(read_text(field).await?),
            Some("text") => form.text = Some(read_text(field).await?),
            Some("is_active") => form.is_active = Some(read_text(field).await?),
            Some("category") => form.category = Some(read_text(field).await?),
            Some("document") => form.document = Some(read_text(field).await?),
            Some("authors") => form.authors.push(read_text(field).await?),
            Some("banner") => {
                let filename = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
                    .to_vec();
                // An empty file input still submits a nameless, zero-byte part.
                if let Some(filename) = filename
                    && !filename.is_empty()
                    && !data.is_empty()
                {
                    banner = Some(BannerUpload { filename, data });
                }
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let mut errors = FormErrors::default();

    let fields = match form.validate() {
        Ok(f) => Some(f),
        Err(e) => {
            errors = e;
            None
        }
    };

    if let Some(fields) = &fields {
        check_references(&state, fields, &mut errors).await?;
    }

    let validated_banner = match banner {
        Some(upload) => validate_banner(&state, upload, &mut errors),
        None => None,
    };

    let (Some(fields), true) = (fields, errors.is_empty()) else {
        return Ok(render_compose_form(&state, form, errors)
            .await?
            .into_response());
    };

    // The image bytes go to the media store before the database rows; a
    // stray blob without a row is harmless, the reverse is a broken page.
    let stored = match validated_banner {
        Some(b) => {
            let hash = state.media.put(&b.data).await?;
            Some((b, hash))
        }
        None => None,
    };

    let now = Utc::now();
    let txn = state.db.begin().await?;

    let saved = post::ActiveModel {
        title: Set(fields.title),
        text: Set(fields.text),
        is_active: Set(fields.is_active),
        category_id: Set(fields.category_id),
        document_id: Set(fields.document_id),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for author_id in &fields.author_ids {
        post_author::ActiveModel {
            post_id: Set(saved.id),
            author_id: Set(*author_id),
        }
        .insert(&txn)
        .await?;
    }

    if let Some((b, hash)) = stored {
        post_image::ActiveModel {
            id: Set(Uuid::now_v7()),
            post_id: Set(saved.id),
            content_hash: Set(hash.to_hex()),
            filename: Set(b.filename),
            content_type: Set(Some(b.mime.to_string())),
            size: Set(b.data.len() as i64),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(post_id = saved.id, "post created via compose form");
    Ok(Redirect::to("/posts/thanks").into_response())
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))
}

/// Verify that the submitted category/document/author ids name existing
/// rows, mirroring the referential checks a model-backed form performs.
async fn check_references(
    state: &AppState,
    fields: &ComposeFields,
    errors: &mut FormErrors,
) -> Result<(), AppError> {
    if let Some(cid) = fields.category_id
        && category::Entity::find_by_id(cid)
            .one(&state.db)
            .await?
            .is_none()
    {
        errors.add("category", "Select a valid category");
    }

    if let Some(did) = fields.document_id
        && document::Entity::find_by_id(did)
            .one(&state.db)
            .await?
            .is_none()
    {
        errors.add("document", "Select a valid document");
    }

    if !fields.author_ids.is_empty() {
        let found = author::Entity::find()
            .filter(author::Column::Id.is_in(fields.author_ids.clone()))
            .all(&state.db)
            .await?;
        if found.len() != fields.author_ids.len() {
            errors.add("authors", "Select valid authors");
        }
    }

    Ok(())
}

fn validate_banner(
    state: &AppState,
    upload: BannerUpload,
    errors: &mut FormErrors,
) -> Option<ValidatedBanner> {
    let filename = match validate_upload_filename(&upload.filename) {
        Ok(name) => name.to_string(),
        Err(msg) => {
            errors.add("banner", msg);
            return None;
        }
    };

    if upload.data.len() as u64 > state.config.media.max_upload_size {
        errors.add(
            "banner",
            format!(
                "File exceeds maximum size of {} bytes",
                state.config.media.max_upload_size
            ),
        );
        return None;
    }

    let Some(mime) = sniff_image_mime(&upload.data) else {
        errors.add("banner", "Upload a valid image (PNG, JPEG, GIF or WebP)");
        return None;
    };

    Some(ValidatedBanner {
        filename,
        mime,
        data: upload.data,
    })
}
