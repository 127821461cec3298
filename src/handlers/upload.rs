use axum::{
    Json,
    extract::{Multipart, State},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

// Multipart field holding the uploaded name
const FILE_FIELD: &str = "filename";

// POST /upload: the file's content is stored as a name
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<String>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Internal(e.body_text()))?;
        let content = String::from_utf8(bytes.to_vec())
            .map_err(|_| ApiError::BadRequest("uploaded file is not valid UTF-8".to_string()))?;

        let user = state.users.create(&content);
        tracing::info!(id = user.id, "name uploaded");
        return Ok(Json(format!("Hello {}", content)));
    }

    Err(ApiError::BadRequest(format!(
        "missing multipart field `{}`",
        FILE_FIELD
    )))
}
