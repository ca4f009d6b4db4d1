//! Image proxy route.
//!
//! Relays catalog images so the mini-app can show them from its own
//! origin. References are resolved with the catalog's URL rules and
//! pinned to the catalog origin; anything else is refused.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use kiosk_commerce::catalog::resolve_image_url;
use serde::Deserialize;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    /// The upstream image reference, in any of the catalog's shapes.
    pub u: Option<String>,
}

pub async fn get_image(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Response {
    let Some(reference) = query.u.as_deref() else {
        return (StatusCode::BAD_REQUEST, "missing image reference").into_response();
    };

    let Some(url) = resolve_proxied(&state.catalog_origin, reference) else {
        return (StatusCode::BAD_REQUEST, "image reference outside catalog origin")
            .into_response();
    };

    match state.http.get(&url).send().await {
        Ok(upstream) if upstream.status().is_success() => {
            let content_type = upstream
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("application/octet-stream")
                .to_string();
            match upstream.bytes().await {
                Ok(bytes) => (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, content_type)],
                    bytes.to_vec(),
                )
                    .into_response(),
                Err(error) => {
                    tracing::warn!(%error, %url, "image body read failed");
                    (StatusCode::BAD_GATEWAY, "image fetch failed").into_response()
                }
            }
        }
        Ok(upstream) => {
            tracing::warn!(status = %upstream.status(), %url, "image upstream error");
            (StatusCode::BAD_GATEWAY, "image fetch failed").into_response()
        }
        Err(error) => {
            tracing::warn!(%error, %url, "image fetch failed");
            (StatusCode::BAD_GATEWAY, "image fetch failed").into_response()
        }
    }
}

/// Resolve a reference and keep it only when it stays on the catalog
/// origin.
fn resolve_proxied(origin: &str, reference: &str) -> Option<String> {
    let url = resolve_image_url(origin, reference);
    if url.is_empty() {
        return None;
    }
    let prefix = format!("{}/", origin.trim_end_matches('/'));
    (url == origin || url.starts_with(&prefix)).then_some(url)
}
