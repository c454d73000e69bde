//! Simulated network latency
//!
//! Every mock operation that models a network call suspends for a short,
//! optionally jittered delay before touching the store, so UI loading states
//! run against the mock the same way they do against the real backend.

use rand::Rng;
use std::time::Duration;

/// Base delay plus uniform jitter applied to simulated network calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    /// Fixed component
    pub base: Duration,
    /// Upper bound of the random component
    pub jitter: Duration,
}

impl LatencyProfile {
    /// No delay at all. Test profile.
    pub const ZERO: Self = Self {
        base: Duration::ZERO,
        jitter: Duration::ZERO,
    };

    /// Fixed delay without jitter
    #[inline]
    #[must_use]
    pub fn fixed(base: Duration) -> Self {
        Self {
            base,
            jitter: Duration::ZERO,
        }
    }

    /// Suspend for one simulated round trip
    pub async fn simulate(self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn sample(self) -> Duration {
        if self.jitter.is_zero() {
            return self.base;
        }
        let jitter_ms = rand::thread_rng().gen_range(0..=self.jitter.as_millis() as u64);
        self.base + Duration::from_millis(jitter_ms)
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(30),
            jitter: Duration::from_millis(50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_profile_never_sleeps() {
        assert_eq!(LatencyProfile::ZERO.sample(), Duration::ZERO);
    }

    #[test]
    fn fixed_profile_samples_exactly_base() {
        let profile = LatencyProfile::fixed(Duration::from_millis(25));
        assert_eq!(profile.sample(), Duration::from_millis(25));
    }

    #[test]
    fn jittered_sample_stays_in_range() {
        let profile = LatencyProfile {
            base: Duration::from_millis(10),
            jitter: Duration::from_millis(20),
        };
        for _ in 0..100 {
            let sample = profile.sample();
            assert!(sample >= Duration::from_millis(10));
            assert!(sample <= Duration::from_millis(30));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn simulate_suspends_for_the_sampled_delay() {
        let start = tokio::time::Instant::now();
        LatencyProfile::fixed(Duration::from_millis(40)).simulate().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
