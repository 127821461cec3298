use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::USERS_TOTAL;
use crate::models::User;

// In-memory name store, ids start at 1
pub struct UserStore {
    users: DashMap<u64, User>,
    next_id: AtomicU64,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn create(&self, name: &str) -> User {
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        USERS_TOTAL.set(self.users.len() as f64);
        user
    }

    /// Users ordered by id, skipping `offset` and returning at most `limit`.
    pub fn find_page(&self, offset: usize, limit: usize) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by_key(|user| user.id);
        users.into_iter().skip(offset).take(limit).collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
