use std::thread::sleep;
use std::time::{Duration, Instant};

/// How the engine drives its ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Tick forever, paced to the configured frame rate
    Continuous,
    /// Run exactly this many ticks back to back, without pacing
    Bounded(u64),
}

/// Sleeps off whatever is left of a tick's time budget
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget: Duration,
}

impl FramePacer {
    pub fn new(ms_per_frame: u64) -> Self {
        Self {
            budget: Duration::from_millis(ms_per_frame),
        }
    }

    /// Time left in the budget after `elapsed`; zero once the tick overran
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// Sleep until `tick_start + budget`
    pub fn sleep_from(&self, tick_start: Instant) {
        let elapsed = tick_start.elapsed();
        let rest = self.remaining(elapsed);
        if rest.is_zero() {
            log::trace!(
                "tick took {:?} which is {:?} over budget",
                elapsed,
                elapsed - self.budget
            );
            return;
        }
        sleep(rest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_never_negative() {
        let pacer = FramePacer::new(50);
        assert_eq!(pacer.remaining(Duration::from_millis(20)), Duration::from_millis(30));
        assert_eq!(pacer.remaining(Duration::from_millis(50)), Duration::ZERO);
        assert_eq!(pacer.remaining(Duration::from_millis(80)), Duration::ZERO);
    }

    #[test]
    fn test_sleep_fills_budget() {
        let pacer = FramePacer::new(15);
        let start = Instant::now();
        pacer.sleep_from(start);
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
