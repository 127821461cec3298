//! Admission control for request pipelines.
//!
//! [`AdmissionMiddleware::intercept`] is framework independent: it either runs
//! the next stage or refuses with [`Rejected`]. [`admit`] plugs it into axum so
//! a route opts in with `middleware::from_fn_with_state`.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use crate::error::problem;
use crate::metrics::{ADMITTED_TOTAL, REJECTED_TOTAL};
use crate::rate_limit::TokenBucket;

/// The request was refused because the shared budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Too many requests")]
pub struct Rejected;

impl IntoResponse for Rejected {
    fn into_response(self) -> Response {
        problem(StatusCode::TOO_MANY_REQUESTS, self.to_string())
    }
}

/// Gate in front of a pipeline stage, backed by a shared [`TokenBucket`].
#[derive(Debug, Clone)]
pub struct AdmissionMiddleware {
    bucket: Arc<TokenBucket>,
}

impl AdmissionMiddleware {
    pub fn new(bucket: Arc<TokenBucket>) -> Self {
        Self { bucket }
    }

    /// Run `next` with the untouched request if a token is available,
    /// otherwise return [`Rejected`] without calling it.
    pub async fn intercept<R, F, Fut>(&self, request: R, next: F) -> Result<Fut::Output, Rejected>
    where
        F: FnOnce(R) -> Fut,
        Fut: Future,
    {
        if !self.bucket.try_acquire() {
            return Err(Rejected);
        }
        Ok(next(request).await)
    }
}

// axum adapter
pub async fn admit(
    State(admission): State<AdmissionMiddleware>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    match admission.intercept(request, |req| next.run(req)).await {
        Ok(response) => {
            ADMITTED_TOTAL.inc();
            tracing::debug!(%path, "request admitted");
            response
        }
        Err(rejected) => {
            REJECTED_TOTAL.inc();
            tracing::warn!(%path, "request rejected by rate limiter");
            rejected.into_response()
        }
    }
}
