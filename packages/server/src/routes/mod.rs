use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> Router<AppState> {
    // The multipart route gets its own body limit: the configured banner
    // ceiling plus some slack for the text fields around it.
    let upload_limit = usize::try_from(config.media.max_upload_size)
        .unwrap_or(usize::MAX)
        .saturating_add(64 * 1024);

    let compose = Router::new()
        .route(
            "/posts/compose",
            get(handlers::compose::compose_form).post(handlers::compose::create_compose_post),
        )
        .layer(DefaultBodyLimit::max(upload_limit));

    Router::new()
        .route("/", get(handlers::posts::index))
        .route(
            "/posts/new",
            get(handlers::posts::new_post_form).post(handlers::posts::create_post),
        )
        .route("/posts/thanks", get(handlers::posts::thanks))
        .route("/posts/{id}", get(handlers::posts::post_detail))
        .route("/media/{image_id}", get(handlers::media::serve_image))
        .merge(compose)
}
