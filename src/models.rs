use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Longest name the greeting endpoint accepts
pub const MAX_NAME_LEN: usize = 30;

// A registered name
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// GET /greeting/{name} response
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GreetingResponse {
    pub message: String,
}

// GET /names query string
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PaginateQuery {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

// problem+json error body (RFC 7807 subset)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ErrorModel {
    pub title: String,
    pub status: u16,
    pub detail: String,
}
