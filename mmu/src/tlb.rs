use log::trace;

use crate::{ring_buffer::RingBuffer, FrameNumber, PageNumber, TLB_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page: PageNumber,
    pub frame: FrameNumber,
}

/// Translation lookaside buffer with FIFO replacement.
///
/// Inserts never deduplicate, so one page can occupy two slots if it
/// faulted again before its old slot was overwritten.
#[derive(Debug, Clone, Default)]
pub struct Tlb {
    entries: RingBuffer<TlbEntry, TLB_SIZE>,
}

impl Tlb {
    pub fn new() -> Self {
        Self::default()
    }

    /// First matching slot wins, scanning in slot order.
    pub fn lookup(&self, page: PageNumber) -> Option<FrameNumber> {
        let frame = self
            .entries
            .iter()
            .find(|entry| entry.page == page)
            .map(|entry| entry.frame);
        if let Some(frame) = frame {
            trace!("TLB hit: page {} -> frame {}", page, frame);
        }
        frame
    }

    pub fn insert(&mut self, page: PageNumber, frame: FrameNumber) {
        self.entries.push(TlbEntry { page, frame });
    }

    /// Drops every slot that maps `page`.
    pub fn invalidate(&mut self, page: PageNumber) -> usize {
        self.entries.clear_where(|entry| entry.page == page)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.entries.cursor()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TlbEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tlb_misses_every_page() {
        let tlb = Tlb::new();
        for page in 0..=255 {
            assert_eq!(tlb.lookup(page), None);
        }
    }

    #[test]
    fn insert_then_lookup() {
        let mut tlb = Tlb::new();
        tlb.insert(3, 0);
        tlb.insert(255, 9);
        assert_eq!(tlb.lookup(3), Some(0));
        assert_eq!(tlb.lookup(255), Some(9));
        assert_eq!(tlb.lookup(4), None);
    }

    #[test]
    fn seventeenth_insert_overwrites_first_slot() {
        let mut tlb = Tlb::new();
        for page in 0..TLB_SIZE as u8 {
            tlb.insert(page, page as u32 + 100);
        }
        assert_eq!(tlb.len(), TLB_SIZE);
        // Touching page 0 does not protect it: overwrite order is insertion order.
        assert_eq!(tlb.lookup(0), Some(100));
        tlb.insert(200, 1);
        assert_eq!(tlb.lookup(0), None);
        assert_eq!(tlb.lookup(1), Some(101));
        assert_eq!(tlb.lookup(200), Some(1));
        assert_eq!(tlb.len(), TLB_SIZE);
        assert_eq!(tlb.cursor(), 1);
    }

    #[test]
    fn duplicate_page_first_slot_wins() {
        let mut tlb = Tlb::new();
        tlb.insert(7, 1);
        tlb.insert(7, 2);
        assert_eq!(tlb.len(), 2);
        assert_eq!(tlb.lookup(7), Some(1));
    }

    #[test]
    fn invalidate_removes_all_slots_for_page() {
        let mut tlb = Tlb::new();
        tlb.insert(7, 1);
        tlb.insert(8, 2);
        tlb.insert(7, 3);
        assert_eq!(tlb.invalidate(7), 2);
        assert_eq!(tlb.lookup(7), None);
        assert_eq!(tlb.lookup(8), Some(2));
        assert_eq!(tlb.cursor(), 3);
    }
}
