use std::time::{Duration, Instant};

/// Default quiet period before a background save
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(3000);

/// Debounced save scheduler. Coalesces bursts of checklist mutations into a
/// single disk write once things go quiet. Driven from the event loop's
/// poll tick; all methods take explicit instants so the coalescing contract
/// is testable without sleeping.
#[derive(Debug)]
pub struct DebouncedSave {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DebouncedSave {
    pub fn new(delay: Duration) -> Self {
        DebouncedSave {
            delay,
            deadline: None,
        }
    }

    /// A mutation landed: (re)arm the countdown. An already-armed countdown
    /// restarts, coalescing the burst into one write.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True once the quiet period has elapsed. Clears the deadline, so the
    /// next due write requires a fresh `mark_dirty`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel any pending countdown. Used at shutdown, where the caller
    /// replaces it with one unconditional final write.
    pub fn flush(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
