/// One-shot deferred callback on the carousel's virtual millisecond clock.
///
/// Arming always replaces the previous deadline, so a slot can never hold two
/// pending firings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<u64>,
}

impl TimerSlot {
    /// Stays disarmed when the deadline would fall past the end of the clock.
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.cancel();
        self.deadline = now_ms.checked_add(delay_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Disarms and returns the deadline if it is due at `now_ms`.
    pub fn take_due(&mut self, now_ms: u64) -> Option<u64> {
        match self.deadline {
            Some(deadline) if deadline <= now_ms => self.deadline.take(),
            _ => None,
        }
    }
}
