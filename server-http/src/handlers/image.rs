use crate::models::ImageQuery;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

const BROWSER_CACHE: &str = "public, max-age=86400";

/// GET /proxy/image?url=
///
/// Always 200. A failed relay answers with the transparent placeholder,
/// which the browser is told not to keep.
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Response {
    let image = state.image_relay.relay(&query.url).await;

    let content_type = HeaderValue::from_str(&image.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let cache_control = if image.placeholder {
        HeaderValue::from_static("no-store")
    } else {
        HeaderValue::from_static(BROWSER_CACHE)
    };

    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, cache_control),
        ],
        image.bytes,
    )
        .into_response()
}
