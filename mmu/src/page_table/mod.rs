mod frame_allocator;
mod iter;
mod page_table_entry;

pub use frame_allocator::FrameAllocator;
pub use iter::ResidentPages;
pub use page_table_entry::PageTableEntry;

use crate::{FrameNumber, PageNumber, NUM_PAGES};

/// One entry per possible page number.
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: [PageTableEntry; NUM_PAGES],
}

impl PageTable {
    pub fn init() -> Self {
        Self {
            entries: [PageTableEntry::default(); NUM_PAGES],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, page: PageNumber) -> &PageTableEntry {
        &self.entries[page as usize]
    }

    pub fn lookup(&self, page: PageNumber) -> Option<FrameNumber> {
        self.entry(page).frame()
    }

    /// Maps `page` to `frame` and starts its counter at zero.
    pub fn install(&mut self, page: PageNumber, frame: FrameNumber) {
        self.entries[page as usize].install(frame);
    }

    /// Invalidates `page`, returning the frame it held.
    pub fn evict(&mut self, page: PageNumber) -> Option<FrameNumber> {
        self.entries[page as usize].clear()
    }

    pub fn touch(&mut self, page: PageNumber) {
        self.entries[page as usize].reset_counter();
    }

    /// Ages every valid entry except `touched` by one step.
    pub fn age_others(&mut self, touched: PageNumber) {
        for (page, entry) in self.entries.iter_mut().enumerate() {
            if page != touched as usize {
                entry.age();
            }
        }
    }

    pub fn resident_count(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> ResidentPages<'_> {
        ResidentPages::new(&self.entries)
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::init()
    }
}
