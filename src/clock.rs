//! Session clock driven by the caller's frame deltas
//!
//! The engine never reads the wall clock itself; a frame loop (or a test)
//! advances it explicitly.

use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionClock {
    elapsed: Duration,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame's worth of time
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Format elapsed time as MM:SS.mmm
    pub fn format_time(&self) -> String {
        let total_millis = self.elapsed.as_millis();
        let minutes = total_millis / 60000;
        let seconds = (total_millis % 60000) / 1000;
        let millis = total_millis % 1000;
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_reset() {
        let mut clock = SessionClock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(17));
        assert_eq!(clock.elapsed(), Duration::from_millis(33));
        clock.reset();
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_format_time() {
        let mut clock = SessionClock::new();
        clock.advance(Duration::from_millis(83_456));
        assert_eq!(clock.format_time(), "01:23.456");
    }
}
