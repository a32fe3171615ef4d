use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{info, instrument};

use crate::entity::{author, category, document, post, post_author, post_image};
use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::forms::FormErrors;
use crate::forms::post::QuickPostForm;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "post_form.html")]
struct QuickPostPage {
    form: QuickPostForm,
    errors: FormErrors,
}

#[derive(Template)]
#[template(path = "thanks.html")]
struct ThanksPage;

#[derive(Template)]
#[template(path = "post_detail.html")]
struct PostDetailPage {
    post: post::Model,
    created_at: String,
    category: Option<category::Model>,
    document: Option<document::Model>,
    authors: Vec<author::Model>,
    banner: Option<post_image::Model>,
}

fn render_quick_form(form: QuickPostForm, errors: FormErrors) -> Result<Html<String>, AppError> {
    let page = QuickPostPage { form, errors };
    Ok(Html(page.render()?))
}

/// The landing page is the quick create form.
pub async fn index() -> Redirect {
    Redirect::to("/posts/new")
}

#[instrument]
pub async fn new_post_form() -> Result<Html<String>, AppError> {
    render_quick_form(QuickPostForm::default(), FormErrors::default())
}

/// Handle the quick form submission: validate, insert, redirect to the
/// confirmation page. A failed validation re-renders the form with inline
/// errors and the entered values, and writes nothing.
#[instrument(skip(state, form))]
pub async fn create_post(
    State(state): State<AppState>,
    AppForm(form): AppForm<QuickPostForm>,
) -> Result<Response, AppError> {
    let new_post = match form.validate() {
        Ok(p) => p,
        Err(errors) => return Ok(render_quick_form(form, errors)?.into_response()),
    };

    let model = post::ActiveModel {
        title: Set(new_post.title),
        text: Set(new_post.text),
        is_active: Set(new_post.is_active),
        created_at: Set(new_post.created_at),
        ..Default::default()
    };
    let saved = model.insert(&state.db).await?;

    info!(post_id = saved.id, "post created via quick form");
    Ok(Redirect::to("/posts/thanks").into_response())
}

#[instrument]
pub async fn thanks() -> Result<Html<String>, AppError> {
    Ok(Html(ThanksPage.render()?))
}

#[instrument(skip(state), fields(id))]
pub async fn post_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let post_model = post::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))?;

    let category = match post_model.category_id {
        Some(cid) => category::Entity::find_by_id(cid).one(&state.db).await?,
        None => None,
    };

    let doc = match post_model.document_id {
        Some(did) => document::Entity::find_by_id(did).one(&state.db).await?,
        None => None,
    };

    let author_ids: Vec<i32> = post_author::Entity::find()
        .filter(post_author::Column::PostId.eq(id))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|pa| pa.author_id)
        .collect();
    let authors = if author_ids.is_empty() {
        Vec::new()
    } else {
        author::Entity::find()
            .filter(author::Column::Id.is_in(author_ids))
            .order_by_asc(author::Column::Name)
            .all(&state.db)
            .await?
    };

    let banner = post_image::Entity::find()
        .filter(post_image::Column::PostId.eq(id))
        .order_by_desc(post_image::Column::CreatedAt)
        .one(&state.db)
        .await?;

    let page = PostDetailPage {
        created_at: post_model.created_at.format("%Y-%m-%d %H:%M").to_string(),
        post: post_model,
        category,
        document: doc,
        authors,
        banner,
    };
    Ok(Html(page.render()?))
}
