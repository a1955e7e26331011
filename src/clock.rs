use std::time::{Duration, Instant};

/// Time source for the driver: a millisecond timestamp for readings and a blocking delay for the
/// wait between a command and its reply.
pub trait Clock {
    /// Milliseconds since some fixed point. Only differences are meaningful.
    fn now_ms(&self) -> u64;

    /// Blocks the calling thread for at least `duration`.
    fn delay(&mut self, duration: Duration);
}

/// Wall clock backed by `Instant`, counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    start: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Never sleeps. Each delay is recorded and advances the clock.
    #[derive(Debug, Default)]
    pub struct FakeClock {
        pub now: u64,
        pub delays: Vec<Duration>,
    }

    impl Clock for FakeClock {
        fn now_ms(&self) -> u64 {
            self.now
        }

        fn delay(&mut self, duration: Duration) {
            self.now += duration.as_millis() as u64;
            self.delays.push(duration);
        }
    }
}
