//! Rate limit snapshots and the budget guard that ends a scan.
//!
//! Every GraphQL response carries a `rateLimit` object describing the
//! account-wide query budget. [`RateLimitStatus`] captures one such snapshot;
//! snapshots are never merged, the most recent one simply replaces the last.
//! [`RateLimitGuard`] decides from a snapshot whether the run must stop.

use chrono::{DateTime, Utc};

/// Remaining-points threshold at or below which a scan stops.
pub const DEFAULT_STOP_THRESHOLD: u32 = 100;

/// Rate limit snapshot returned alongside a GraphQL response.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use prscout::github::rate_limit::RateLimitStatus;
///
/// let reset_at = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid timestamp");
/// let status = RateLimitStatus::new(5000, 1, 4999, reset_at);
/// assert_eq!(status.remaining(), 4999);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Points allowed in the current window.
    limit: u32,
    /// Points charged for the query that produced this snapshot.
    cost: u32,
    /// Points left in the current window.
    remaining: u32,
    /// When the window resets.
    reset_at: DateTime<Utc>,
}

impl RateLimitStatus {
    /// Creates a new rate limit snapshot.
    #[must_use]
    pub const fn new(limit: u32, cost: u32, remaining: u32, reset_at: DateTime<Utc>) -> Self {
        Self {
            limit,
            cost,
            remaining,
            reset_at,
        }
    }

    /// Returns the points allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the cost of the query that produced this snapshot.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Returns the points left in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns the instant the window resets.
    #[must_use]
    pub const fn reset_at(&self) -> DateTime<Utc> {
        self.reset_at
    }

    /// Calculates seconds until the window resets.
    ///
    /// Returns 0 if the reset time has already passed.
    #[must_use]
    pub fn seconds_until_reset(&self) -> u64 {
        let seconds = (self.reset_at - Utc::now()).num_seconds();
        u64::try_from(seconds).unwrap_or(0)
    }
}

/// Decides whether a scan must stop to preserve the remaining budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitGuard {
    threshold: u32,
}

impl RateLimitGuard {
    /// Creates a guard that stops once `remaining <= threshold`.
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Returns the configured threshold.
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Returns true when the snapshot leaves too little budget to continue.
    #[must_use]
    pub const fn should_stop(&self, status: &RateLimitStatus) -> bool {
        status.remaining <= self.threshold
    }
}

impl Default for RateLimitGuard {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    use super::{RateLimitGuard, RateLimitStatus};

    fn status_with_remaining(remaining: u32) -> RateLimitStatus {
        let reset_at = Utc
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("timestamp should be valid");
        RateLimitStatus::new(5000, 1, remaining, reset_at)
    }

    #[rstest]
    #[case::well_above(4999, false)]
    #[case::just_above(101, false)]
    #[case::at_threshold(100, true)]
    #[case::below(99, true)]
    #[case::exhausted(0, true)]
    fn default_guard_stops_at_one_hundred_inclusive(
        #[case] remaining: u32,
        #[case] expected: bool,
    ) {
        let guard = RateLimitGuard::default();
        assert_eq!(
            guard.should_stop(&status_with_remaining(remaining)),
            expected,
            "unexpected decision for remaining={remaining}"
        );
    }

    #[rstest]
    fn custom_threshold_is_respected() {
        let guard = RateLimitGuard::new(500);
        assert!(guard.should_stop(&status_with_remaining(500)));
        assert!(!guard.should_stop(&status_with_remaining(501)));
    }

    #[test]
    fn seconds_until_reset_returns_zero_when_reset_has_passed() {
        let status = status_with_remaining(10);
        assert_eq!(status.seconds_until_reset(), 0);
    }

    #[test]
    fn seconds_until_reset_returns_positive_for_future_reset() {
        let status = RateLimitStatus::new(5000, 1, 0, Utc::now() + Duration::seconds(60));

        let seconds = status.seconds_until_reset();
        assert!(
            (1..=60).contains(&seconds),
            "expected 1..=60 seconds until reset, got {seconds}"
        );
    }
}
