use axum::{http::StatusCode, response::Json};
use serde_json::{Value, json};

use crate::{config::SyncConfig, management::TokenManager, sync};

/// Request/response invocation of the sync pipeline. The request carries no
/// input; every run recomputes desired and current state from live data.
pub async fn sync() -> Result<Json<Value>, (StatusCode, String)> {
    let cfg = SyncConfig::from_env().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let mut token_mgr = TokenManager::load().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load token. Please run stashcli auth. Error: {}", e),
        )
    })?;

    match sync::run(&mut token_mgr, &cfg).await {
        Ok(report) => Ok(Json(json!({
            "status": "ok",
            "message": "Master playlist updated successfully",
            "playlists": report.playlists,
            "collected": report.collected,
            "unique": report.unique,
            "skipped": report.skipped,
            "duplicates": report.duplicates,
            "pruned": report.pruned,
            "removed": report.removed,
            "added": report.added,
        }))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Sync failed: {}", e),
        )),
    }
}
