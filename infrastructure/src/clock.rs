//! Wall-clock adapter for the [`Clock`] port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use counsel_application::Clock;
use std::time::Duration;

/// System time and `tokio` timers.
///
/// `now` is truncated to whole milliseconds, the resolution the store
/// keeps, so a returned record and its stored copy carry the same instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sleep_waits() {
        let start = std::time::Instant::now();
        SystemClock.sleep(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_now_is_utc_wall_clock() {
        let before = Utc::now().timestamp_millis();
        let now = SystemClock.now();
        assert!(now.timestamp_millis() >= before);
    }

    #[test]
    fn test_now_has_millisecond_resolution() {
        for _ in 0..100 {
            let now = SystemClock.now();
            assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
        }
    }
}
