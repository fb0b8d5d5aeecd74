use std::collections::BTreeSet;

/// Pending "end of flash" clears for color buttons.
///
/// Every click queues its own clear; a second click on the same button does not
/// replace the first one. Clears fire in deadline order and clearing a button
/// that is already clear is harmless.
#[derive(Debug, Clone, Default)]
pub struct FlashSchedule {
    pending: BTreeSet<(u64, usize)>,
}

impl FlashSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, index: usize, deadline_ms: u64) {
        self.pending.insert((deadline_ms, index));
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.first().map(|&(deadline, _)| deadline)
    }

    /// Remove every clear due at or before `now_ms`; returns the affected indices
    /// in ascending order, each once.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<usize> {
        let due = match now_ms.checked_add(1) {
            Some(bound) => {
                let later = self.pending.split_off(&(bound, 0));
                std::mem::replace(&mut self.pending, later)
            }
            None => std::mem::take(&mut self.pending),
        };
        let indices: BTreeSet<usize> = due.into_iter().map(|(_, index)| index).collect();
        indices.into_iter().collect()
    }
}
