//! Platform abstraction layer
//!
//! The simulation never schedules itself. A host supplies a [`Ticker`] that
//! turns tick requests into `Session::on_tick(timestamp)` calls: a display
//! refresh callback in a browser or app, or [`ManualTicker`] + [`FixedClock`]
//! for headless runs and tests.

/// Frame source the session asks for the next tick
pub trait Ticker {
    /// Ask for one more `on_tick` call
    fn request_tick(&mut self);
    /// Withdraw an outstanding request, if any
    fn cancel(&mut self);
}

/// Ticker that just records whether a tick is pending
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    pending: bool,
    requests: u64,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending request
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Total requests seen
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl Ticker for ManualTicker {
    fn request_tick(&mut self) {
        self.pending = true;
        self.requests += 1;
    }

    fn cancel(&mut self) {
        self.pending = false;
    }
}

/// Monotonic clock advancing by a fixed frame interval
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: f64,
    frame: f64,
}

impl FixedClock {
    pub fn new(fps: f64) -> Self {
        Self {
            now: 0.0,
            frame: 1.0 / fps,
        }
    }

    /// Current timestamp (seconds)
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance one frame and return the new timestamp
    pub fn advance(&mut self) -> f64 {
        self.now += self.frame;
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_ticker() {
        let mut ticker = ManualTicker::new();
        assert!(!ticker.take_pending());
        ticker.request_tick();
        ticker.request_tick();
        assert!(ticker.is_pending());
        assert!(ticker.take_pending());
        assert!(!ticker.is_pending());
        ticker.request_tick();
        ticker.cancel();
        assert!(!ticker.is_pending());
        assert_eq!(ticker.requests(), 3);
    }

    #[test]
    fn test_fixed_clock() {
        let mut clock = FixedClock::new(50.0);
        assert_eq!(clock.now(), 0.0);
        clock.advance();
        assert!((clock.advance() - 0.04).abs() < 1e-12);
    }
}
