use axum::Json;
use axum::extract::State;
use axum::response::Html;
use tracing::warn;

use crate::error::ApiResponse;
use crate::middleware::RequireAuth;
use crate::pages;
use crate::router::AppState;
use crate::store::{EmailRecord, SaveFields};

/// GET / -> editor populated from the current record. A missing row or a
/// failed load both render the defaults, as the editor is still usable for
/// the first save.
pub async fn editor(State(state): State<AppState>, _auth: RequireAuth) -> Html<String> {
    let record = match state.store.load().await {
        Ok(Some(record)) => record,
        Ok(None) => EmailRecord::default(),
        Err(e) => {
            warn!(error = %e, "record load failed, rendering defaults");
            EmailRecord::default()
        }
    };
    Html(pages::editor_page(&record))
}

/// POST /api/save
pub async fn save(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Json(fields): Json<SaveFields>,
) -> Json<ApiResponse> {
    Json(ApiResponse::from(state.store.save(&fields).await))
}

/// POST /api/send
pub async fn send(State(state): State<AppState>, _auth: RequireAuth) -> Json<ApiResponse> {
    Json(ApiResponse::from(state.dispatcher.dispatch().await))
}

/// GET /health -> minimal plain-text body for uptime monitors; never touches
/// the datastore and needs no authentication.
pub async fn health() -> &'static str {
    "ok"
}
