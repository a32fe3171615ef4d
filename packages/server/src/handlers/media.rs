use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use sea_orm::EntityTrait;
use tokio_util::io::ReaderStream;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::post_image;
use crate::error::AppError;
use crate::state::AppState;

/// Stream a stored banner image. The content hash doubles as a strong
/// ETag, so revalidating clients get a 304 without touching the store.
#[instrument(skip(state, headers), fields(image_id))]
pub async fn serve_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id =
        Uuid::parse_str(&image_id).map_err(|_| AppError::NotFound("Image not found".into()))?;

    let image = post_image::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))?;

    let etag_value = format!("\"{}\"", image.content_hash);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let hash = common::media::MediaHash::from_hex(&image.content_hash)?;
    let reader = state.media.open(&hash).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let content_type = image
        .content_type
        .as_deref()
        .unwrap_or("application/octet-stream");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, image.size.to_string())
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}
