// src/geocode/pacer.rs
use std::thread;
use std::time::{Duration, Instant};

/// Sequential request pacer: admits a call only after `min_interval` has
/// elapsed since the previous one. The provider's fair-use policy is a
/// spacing contract, so this stays a swappable abstraction rather than an
/// inline sleep.
#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    last: Option<Instant>,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Block until the spacing policy admits another request. The first
    /// call goes through immediately.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                thread::sleep(self.min_interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}
