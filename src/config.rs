use clap::Parser;
use std::time::Duration;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "greeting-gateway")]
#[command(about = "Greeting service with token-bucket admission control")]
pub struct Args {
    // Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, default_value_t = 8888)]
    pub port: u16,

    // Burst size: requests admitted back to back before throttling
    #[arg(long, default_value_t = 2)]
    pub rate_capacity: u32,

    // Seconds it takes to restore one unit of capacity
    #[arg(long, default_value_t = 60)]
    pub rate_interval: u64,

    // Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn refill_interval(&self) -> Duration {
        Duration::from_secs(self.rate_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_policy() {
        let args = Args::try_parse_from(["greeting-gateway"]).unwrap();
        assert_eq!(args.addr(), "127.0.0.1:8888");
        assert_eq!(args.rate_capacity, 2);
        assert_eq!(args.refill_interval(), Duration::from_secs(60));
    }

    #[test]
    fn policy_is_settable() {
        let args = Args::try_parse_from([
            "greeting-gateway",
            "--rate-capacity",
            "50",
            "--rate-interval",
            "1",
            "-p",
            "9000",
        ])
        .unwrap();
        assert_eq!(args.rate_capacity, 50);
        assert_eq!(args.refill_interval(), Duration::from_secs(1));
        assert_eq!(args.port, 9000);
    }
}
