use std::time::{Duration, Instant};

/// Fixed-interval tick scheduler driven by caller-supplied instants.
///
/// The ticker never sleeps. Hosts poll it from their own loop, which keeps
/// the schedule testable without real time passing.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    last_tick: Instant,
    cancelled: bool,
}

impl Ticker {
    /// Creates a ticker whose first tick is due one interval after `now`.
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
            cancelled: false,
        }
    }

    /// Returns true when a tick is due.
    ///
    /// The schedule advances by whole intervals so loop latency does not
    /// drift the cadence. After a stall of more than one interval it fires
    /// once and re-arms from `now`; a slow frame delays the snake instead of
    /// making it jump.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now.saturating_duration_since(self.last_tick) < self.interval {
            return false;
        }

        self.last_tick += self.interval;
        if now.saturating_duration_since(self.last_tick) >= self.interval {
            self.last_tick = now;
        }
        true
    }

    /// Time left until the next tick is due. Zero when overdue.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }

    /// Restarts the schedule from `now`, clearing any cancellation.
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = now;
        self.cancelled = false;
    }

    /// Stops the ticker; `poll` returns false until `reset`.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Ticker;

    const INTERVAL: Duration = Duration::from_millis(150);

    #[test]
    fn does_not_fire_before_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL, start);

        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(149)));
        assert!(ticker.poll(start + INTERVAL));
    }

    #[test]
    fn fires_once_after_a_long_stall() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL, start);
        let late = start + INTERVAL * 5;

        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert!(ticker.poll(late + INTERVAL));
    }

    #[test]
    fn late_polls_do_not_drift_the_schedule() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL, start);
        let jitter = Duration::from_millis(30);

        assert!(ticker.poll(start + INTERVAL + jitter));
        assert_eq!(
            ticker.time_until_next(start + INTERVAL + jitter),
            INTERVAL - jitter
        );
        assert!(ticker.poll(start + INTERVAL * 2));
        assert!(!ticker.poll(start + INTERVAL * 2 + jitter));
        assert!(ticker.poll(start + INTERVAL * 3));
    }

    #[test]
    fn cancel_stops_ticks_until_reset() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL, start);

        ticker.cancel();
        assert!(ticker.is_cancelled());
        assert!(!ticker.poll(start + INTERVAL * 3));

        let restart = start + INTERVAL * 3;
        ticker.reset(restart);
        assert!(!ticker.is_cancelled());
        assert!(ticker.poll(restart + INTERVAL));
    }

    #[test]
    fn time_until_next_counts_down_to_zero() {
        let start = Instant::now();
        let ticker = Ticker::new(INTERVAL, start);

        assert_eq!(ticker.time_until_next(start), INTERVAL);
        assert_eq!(
            ticker.time_until_next(start + Duration::from_millis(100)),
            Duration::from_millis(50)
        );
        assert_eq!(ticker.time_until_next(start + INTERVAL * 2), Duration::ZERO);
        assert_eq!(ticker.interval(), INTERVAL);
    }
}
