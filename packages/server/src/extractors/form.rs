use axum::extract::{FromRequest, Request};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A `Form<T>` wrapper that converts deserialization errors into
/// `AppError::Validation`, so clients get the HTML error page rather than
/// the extractor's plain-text rejection.
///
/// Built on `axum_extra`'s form extractor, which supports repeated keys
/// (multi-select fields) that the plain `axum::Form` rejects.
pub struct AppForm<T>(pub T);

impl<S, T> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(AppForm(value))
    }
}
