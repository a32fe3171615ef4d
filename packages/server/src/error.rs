use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use common::media::MediaError;
use sea_orm::DbErr;

/// Application-level error type.
///
/// Field-level form validation never reaches this — failed submissions
/// re-render the form page instead. `AppError` covers everything else:
/// malformed requests, missing records, and infrastructure failures.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Internal(String),
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    status: u16,
    title: &'a str,
    message: &'a str,
}

impl AppError {
    fn status_and_title(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title) = self.status_and_title();
        let message = match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg,
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                "An unexpected error occurred".to_string()
            }
        };

        let page = ErrorPage {
            status: status.as_u16(),
            title,
            message: &message,
        };
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            // Template rendering failed; fall back to plain text.
            Err(_) => (status, title).into_response(),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::NotFound(hash) => {
                tracing::warn!("Media object missing: {hash}");
                AppError::NotFound("Image not found".into())
            }
            MediaError::TooLarge { actual, limit } => AppError::Validation(format!(
                "File exceeds maximum size of {limit} bytes (got {actual})"
            )),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Internal(format!("Template rendering failed: {err}"))
    }
}
