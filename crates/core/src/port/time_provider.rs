// Time Provider Port - wall clock for run durations

/// Millisecond clock
pub trait TimeProvider: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    /// Milliseconds since `start_millis`, never negative
    fn elapsed_millis(&self, start_millis: i64) -> u64 {
        self.now_millis().saturating_sub(start_millis).max(0) as u64
    }
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock that only moves when told to
    pub struct ManualTimeProvider {
        now: AtomicI64,
    }

    impl ManualTimeProvider {
        pub fn new(start_millis: i64) -> Self {
            Self {
                now: AtomicI64::new(start_millis),
            }
        }

        pub fn advance(&self, millis: i64) {
            self.now.fetch_add(millis, Ordering::SeqCst);
        }
    }

    impl TimeProvider for ManualTimeProvider {
        fn now_millis(&self) -> i64 {
            self.now.load(Ordering::SeqCst)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::ManualTimeProvider;
    use super::*;

    #[test]
    fn test_elapsed_millis() {
        let clock = ManualTimeProvider::new(1_000);
        let start = clock.now_millis();
        clock.advance(250);

        assert_eq!(clock.elapsed_millis(start), 250);
        // A clock that went backwards reports zero
        assert_eq!(clock.elapsed_millis(start + 10_000), 0);
    }
}
