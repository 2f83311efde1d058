//! Frame-rate limiting.
//!
//! The limiter is the loop's only suspension point: a plain delay that caps
//! how often frames are produced. It is not a real-time guarantee.

use std::thread;
use std::time::{Duration, Instant};

/// Caps loop iterations to a frame rate.
pub trait FrameLimiter {
    /// Wait until at least one frame budget has passed since the previous
    /// call. Returns the time elapsed since that call.
    fn wait(&mut self, fps: u32) -> Duration;
}

/// Time budget of one frame at `fps` (a rate of 0 is treated as 1).
pub fn frame_budget(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

/// Sleeping limiter backed by the monotonic clock.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameLimiter for FrameClock {
    fn wait(&mut self, fps: u32) -> Duration {
        let budget = frame_budget(fps);
        if let Some(last) = self.last_tick {
            let spent = last.elapsed();
            if spent < budget {
                thread::sleep(budget - spent);
            }
        }

        let now = Instant::now();
        let elapsed = self
            .last_tick
            .map(|last| now.duration_since(last))
            .unwrap_or_default();
        self.last_tick = Some(now);
        elapsed
    }
}

/// Limiter that never waits. Counts how often it was asked to.
#[derive(Debug, Clone, Default)]
pub struct Unlimited {
    ticks: u64,
}

impl Unlimited {
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl FrameLimiter for Unlimited {
    fn wait(&mut self, _fps: u32) -> Duration {
        self.ticks += 1;
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_budget() {
        assert_eq!(frame_budget(1), Duration::from_secs(1));
        assert_eq!(frame_budget(50), Duration::from_millis(20));
        assert_eq!(frame_budget(0), Duration::from_secs(1));
    }

    #[test]
    fn test_first_wait_does_not_sleep() {
        let mut clock = FrameClock::new();
        let started = Instant::now();
        assert_eq!(clock.wait(1), Duration::ZERO);
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_second_wait_fills_frame_budget() {
        let mut clock = FrameClock::new();
        clock.wait(100);
        let elapsed = clock.wait(100);
        assert!(elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn test_unlimited_counts_ticks() {
        let mut limiter = Unlimited::default();
        limiter.wait(30);
        limiter.wait(30);
        assert_eq!(limiter.ticks(), 2);
    }
}
