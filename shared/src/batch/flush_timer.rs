use std::time::{Duration, Instant};

/// A one-shot deadline polled from the owner's update loop
#[derive(Debug, Default)]
pub struct FlushTimer {
    deadline: Option<Instant>,
}

impl FlushTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer unless it is already armed. Returns whether it was armed by this call.
    pub fn arm(&mut self, now: Instant, interval: Duration) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = Some(now + interval);
        true
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn ringing(&self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }
}
