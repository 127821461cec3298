use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::admission::admit;
use crate::handlers::{
    get_name_handler, greeting_handler, health_handler, list_names_handler, metrics_handler,
    upload_handler,
};
use crate::state::AppState;

// Routes opt into admission control one by one; only the greeting is throttled
pub fn router(state: Arc<AppState>) -> Router {
    let throttled = middleware::from_fn_with_state(state.admission.clone(), admit);

    Router::new()
        .route("/greeting/{name}", get(greeting_handler).layer(throttled))
        .route("/names", get(list_names_handler))
        .route("/names/{id}", get(get_name_handler))
        .route("/upload", post(upload_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}
