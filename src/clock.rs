use std::time::{Duration, Instant};

/// Fixed-cadence tick source. The caller polls it as often as it likes;
/// [`Clock::poll`] answers whether a tick is due.
#[derive(Debug)]
pub struct Clock {
    interval: Duration,
    next: Option<Instant>,
}

impl Clock {
    pub fn new(interval: Duration) -> Self {
        Clock { interval, next: None }
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(next) = self.next else {
            return false;
        };

        if now < next {
            return false;
        }

        // Missed more than one interval: re-anchor instead of catching up.
        let following = next + self.interval;
        self.next = Some(if now >= following { now + self.interval } else { following });
        true
    }
}
