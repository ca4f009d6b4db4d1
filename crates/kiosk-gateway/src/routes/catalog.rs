//! Catalog proxy route.
//!
//! Always answers 200 with a catalog document: the fresh upstream one
//! when the fetch succeeds, otherwise the last good document, otherwise
//! the empty `{categories:[],products:[]}` document. The client keeps
//! rendering something either way.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use super::AppState;

pub async fn get_catalog(State(state): State<AppState>) -> impl IntoResponse {
    let document = match state.client.fetch().await {
        Ok(document) => {
            *state.last_good.write().await = Some(document.clone());
            document
        }
        Err(error) => {
            tracing::warn!(%error, "catalog fetch failed, serving last good document");
            state.last_good.read().await.clone().unwrap_or_default()
        }
    };

    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(document),
    )
}
