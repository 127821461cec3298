//! Load generator: hammers one endpoint from many concurrent workers and
//! reports how many requests got through and how many were throttled.

use clap::Parser;
use reqwest::StatusCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

#[derive(Parser, Debug)]
#[command(name = "bomb")]
#[command(about = "Fire concurrent requests at the gateway")]
struct Args {
    // Endpoint to hit
    #[arg(long, default_value = "http://localhost:8888/greeting/world")]
    url: String,

    // Total number of requests to send
    #[arg(short = 'n', long, default_value_t = 1000)]
    requests: usize,

    // Number of concurrent workers
    #[arg(short, long, default_value_t = 50)]
    concurrency: usize,

    // Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

#[derive(Default)]
struct Tally {
    ok: AtomicUsize,
    throttled: AtomicUsize,
    other: AtomicUsize,
    failed: AtomicUsize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let args = Args::parse();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;
    let url = Arc::new(args.url);
    let next = Arc::new(AtomicUsize::new(0));
    let tally = Arc::new(Tally::default());

    let start = Instant::now();
    let mut workers = JoinSet::new();
    for _ in 0..args.concurrency {
        let client = client.clone();
        let url = Arc::clone(&url);
        let next = Arc::clone(&next);
        let tally = Arc::clone(&tally);
        let total = args.requests;

        workers.spawn(async move {
            while next.fetch_add(1, Ordering::Relaxed) < total {
                match client.get(url.as_str()).send().await {
                    Ok(res) if res.status().is_success() => {
                        tally.ok.fetch_add(1, Ordering::Relaxed);
                    }
                    Ok(res) if res.status() == StatusCode::TOO_MANY_REQUESTS => {
                        tally.throttled.fetch_add(1, Ordering::Relaxed);
                    }
                    Ok(res) => {
                        tracing::warn!(status = %res.status(), "unexpected status");
                        tally.other.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "request failed");
                        tally.failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        });
    }
    while workers.join_next().await.is_some() {}

    println!("Sent {} requests in {:?}", args.requests, start.elapsed());
    println!("Successes: {}", tally.ok.load(Ordering::Relaxed));
    println!("Throttled: {}", tally.throttled.load(Ordering::Relaxed));
    println!("Other status: {}", tally.other.load(Ordering::Relaxed));
    println!("Failed: {}", tally.failed.load(Ordering::Relaxed));
    Ok(())
}
