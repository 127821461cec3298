use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, register_counter, register_gauge};


lazy_static! {
    pub static ref ADMITTED_TOTAL: Counter =
        register_counter!("gateway_admitted_requests_total", "Requests let through by the rate limiter").unwrap();
    pub static ref REJECTED_TOTAL: Counter =
        register_counter!("gateway_rejected_requests_total", "Requests refused with 429 by the rate limiter").unwrap();
    pub static ref USERS_TOTAL: Gauge =
        register_gauge!("gateway_users", "Current number of stored names").unwrap();
}
