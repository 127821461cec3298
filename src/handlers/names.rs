use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{PaginateQuery, User};
use crate::state::AppState;

// GET /names?page=&limit=
pub async fn list_names_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PaginateQuery>, QueryRejection>,
) -> Result<Json<Vec<User>>, ApiError> {
    let Query(paginate) = query.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    if paginate.limit == 0 {
        return Err(ApiError::Unprocessable("limit must be at least 1".to_string()));
    }

    let offset = paginate.page.saturating_mul(paginate.limit);
    Ok(Json(state.users.find_page(offset, paginate.limit)))
}

// GET /names/{id}: lookups by id are refused outright
pub async fn get_name_handler(Path(_id): Path<String>) -> Result<Json<User>, ApiError> {
    Err(ApiError::NotAcceptable("You know why...".to_string()))
}
