use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{GreetingResponse, MAX_NAME_LEN};
use crate::state::AppState;

// GET /greeting/{name}: records the name and greets it
pub async fn greeting_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<GreetingResponse>, ApiError> {
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::Unprocessable(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }

    let user = state.users.create(&name);
    tracing::info!(id = user.id, name = %user.name, total = state.users.len(), "greeted");

    Ok(Json(GreetingResponse {
        message: format!("Hello, {}!", name),
    }))
}
