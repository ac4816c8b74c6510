use crate::engine::Outcome;

/// Counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total: u64,
    pub faults: u64,
    pub tlb_hits: u64,
    pub page_table_hits: u64,
    pub evictions: u64,
    /// Faults served with a zero-filled page after a failed store read.
    pub zero_filled: u64,
}

fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

impl Statistics {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome {
            Outcome::TlbHit => self.tlb_hits += 1,
            Outcome::PageTableHit => self.page_table_hits += 1,
            Outcome::PageFault { evicted } => {
                self.faults += 1;
                if evicted.is_some() {
                    self.evictions += 1;
                }
            }
        }
    }

    pub fn fault_rate(&self) -> f64 {
        percentage(self.faults, self.total)
    }

    pub fn tlb_hit_rate(&self) -> f64 {
        percentage(self.tlb_hits, self.total)
    }
}
