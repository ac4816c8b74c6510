use super::PageTableEntry;
use crate::PageNumber;

/// Walks the resident entries of a page table in ascending page order.
pub struct ResidentPages<'a> {
    current: usize,
    entries: &'a [PageTableEntry],
}

impl<'a> ResidentPages<'a> {
    pub(super) fn new(entries: &'a [PageTableEntry]) -> Self {
        Self {
            current: 0,
            entries,
        }
    }
}

impl<'a> Iterator for ResidentPages<'a> {
    type Item = (PageNumber, &'a PageTableEntry);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entry) = self.entries.get(self.current) {
            let page = self.current as PageNumber;
            self.current += 1;
            if entry.is_valid() {
                return Some((page, entry));
            }
        }
        None
    }
}
