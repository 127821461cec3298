use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

use crate::error::ConfigError;

// Mutable part of the bucket, only touched under the mutex
#[derive(Debug)]
struct BucketState {
    tokens: u32,
    last_refill: Instant,
}

/// Global admission budget: bursts up to `capacity`, then one extra request
/// per `refill_interval`.
///
/// The refill check and the decrement happen in one critical section, so two
/// callers can never take the same token.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: u32,
    refill_interval: Duration,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    // Starts full, so the first `capacity` calls are admitted right away
    pub fn new(capacity: u32, refill_interval: Duration) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if refill_interval.is_zero() {
            return Err(ConfigError::ZeroRefillInterval);
        }

        Ok(Self {
            capacity,
            refill_interval,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn refill_interval(&self) -> Duration {
        self.refill_interval
    }

    /// Take one token if there is one. Never blocks on anything but the
    /// (uncontended, I/O-free) critical section.
    pub fn try_acquire(&self) -> bool {
        // Nothing in the critical section can panic halfway through an
        // update, so a poisoned lock still guards consistent state.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        self.refill(&mut state, now);

        if state.tokens == 0 {
            return false;
        }
        state.tokens -= 1;
        true
    }

    fn refill(&self, state: &mut BucketState, now: Instant) {
        // Time spent full is not banked
        if state.tokens >= self.capacity {
            state.last_refill = now;
            return;
        }

        let elapsed = now.saturating_duration_since(state.last_refill);
        let intervals = elapsed.as_nanos() / self.refill_interval.as_nanos();
        if intervals == 0 {
            return;
        }

        let refilled = u32::try_from(intervals).unwrap_or(u32::MAX);
        let tokens = state.tokens.saturating_add(refilled);
        if tokens >= self.capacity {
            state.tokens = self.capacity;
            state.last_refill = now;
        } else {
            // keep the sub-interval remainder for the next refill
            state.tokens = tokens;
            state.last_refill += self.refill_interval * refilled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn rejects_zero_capacity() {
        let err = TokenBucket::new(0, MINUTE).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCapacity));
    }

    #[test]
    fn rejects_zero_refill_interval() {
        let err = TokenBucket::new(2, Duration::ZERO).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroRefillInterval));
    }

    #[test]
    fn exposes_policy() {
        let bucket = TokenBucket::new(2, MINUTE).unwrap();
        assert_eq!(bucket.capacity(), 2);
        assert_eq!(bucket.refill_interval(), MINUTE);
    }

    #[tokio::test(start_paused = true)]
    async fn admits_burst_then_rejects() {
        let bucket = TokenBucket::new(2, MINUTE).unwrap();

        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn restores_one_token_per_interval() {
        let bucket = TokenBucket::new(2, MINUTE).unwrap();
        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());

        tokio::time::advance(MINUTE - Duration::from_millis(1)).await;
        assert!(!bucket.try_acquire());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_partial_interval_between_refills() {
        let bucket = TokenBucket::new(3, MINUTE).unwrap();
        for _ in 0..3 {
            assert!(bucket.try_acquire());
        }

        // 1.5 intervals: one token now, half an interval carried over
        tokio::time::advance(Duration::from_secs(90)).await;
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());

        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn never_refills_past_capacity() {
        let bucket = TokenBucket::new(2, MINUTE).unwrap();
        tokio::time::advance(MINUTE * 10).await;

        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_full_bucket_does_not_bank_time() {
        let bucket = TokenBucket::new(2, MINUTE).unwrap();

        // sit full for most of an interval, then drain
        tokio::time::advance(Duration::from_secs(50)).await;
        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());

        // 10s later would complete the first interval since construction
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(!bucket.try_acquire());

        tokio::time::advance(Duration::from_secs(50)).await;
        assert!(bucket.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn sustained_load_settles_to_refill_rate() {
        let bucket = TokenBucket::new(2, MINUTE).unwrap();
        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());

        for _ in 0..20 {
            tokio::time::advance(MINUTE).await;
            let admitted = (0..10).filter(|_| bucket.try_acquire()).count();
            assert_eq!(admitted, 1);
        }
    }

    #[test]
    fn concurrent_callers_never_over_admit() {
        let bucket = Arc::new(TokenBucket::new(100, Duration::from_secs(3600)).unwrap());
        let admitted = Arc::new(AtomicUsize::new(0));

        thread::scope(|scope| {
            for _ in 0..16 {
                let bucket = Arc::clone(&bucket);
                let admitted = Arc::clone(&admitted);
                scope.spawn(move || {
                    for _ in 0..50 {
                        if bucket.try_acquire() {
                            admitted.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(admitted.load(Ordering::Relaxed), 100);
        assert!(!bucket.try_acquire());
    }
}
