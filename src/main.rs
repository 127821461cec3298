use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod admission;
mod config;
mod error;
mod handlers;
mod metrics;
mod models;
mod rate_limit;
mod routes;
mod state;
mod store;

use admission::AdmissionMiddleware;
use config::Args;
use rate_limit::TokenBucket;
use state::AppState;

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    // one limiter for the whole process; invalid policy stops startup here
    let bucket = TokenBucket::new(args.rate_capacity, args.refill_interval())?;
    tracing::info!(
        "Rate limit: burst of {} then 1 request per {:?}",
        bucket.capacity(),
        bucket.refill_interval()
    );
    let admission = AdmissionMiddleware::new(Arc::new(bucket));
    let state = Arc::new(AppState::new(admission));

    let app = routes::router(state);

    let addr = args.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Gateway running on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
