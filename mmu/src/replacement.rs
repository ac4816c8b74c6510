//! Frame acquisition for page faults.
//!
//! Faults take fresh frames from a [`FrameAllocator`] until every frame has
//! been handed out. From then on each fault reuses the frame of the resident
//! page with the largest aging counter, i.e. the page touched longest ago.
//! The victim scan walks all page-table entries in page order and only
//! replaces its candidate on a strictly greater counter, so ties go to the
//! lowest page number. Invalid entries are never candidates.

use std::fmt;

use log::debug;

use crate::{FrameAllocator, FrameNumber, PageNumber, PageTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameGrant {
    /// A frame that had never been used.
    Free(FrameNumber),
    /// A frame taken from `victim`, whose entry is now invalid.
    Evicted {
        frame: FrameNumber,
        victim: PageNumber,
    },
}

impl FrameGrant {
    pub fn frame(&self) -> FrameNumber {
        match *self {
            FrameGrant::Free(frame) => frame,
            FrameGrant::Evicted { frame, .. } => frame,
        }
    }

    pub fn victim(&self) -> Option<PageNumber> {
        match *self {
            FrameGrant::Free(_) => None,
            FrameGrant::Evicted { victim, .. } => Some(victim),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ReplacementError {
    /// Every frame is in use but no page is resident.
    NoVictim,
}

impl fmt::Display for ReplacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplacementError::NoVictim => write!(f, "frame pool is full but no page is resident"),
        }
    }
}

impl std::error::Error for ReplacementError {}

#[derive(Debug, Clone)]
pub struct ReplacementPolicy {
    allocator: FrameAllocator,
}

impl ReplacementPolicy {
    pub fn new(num_frames: usize) -> Self {
        Self {
            allocator: FrameAllocator::init(num_frames),
        }
    }

    pub fn is_saturated(&self) -> bool {
        self.allocator.is_saturated()
    }

    pub fn allocator(&self) -> &FrameAllocator {
        &self.allocator
    }

    /// The resident page with the strictly largest counter, lowest page on ties.
    pub fn select_victim(table: &PageTable) -> Option<PageNumber> {
        let mut oldest: Option<(PageNumber, u32)> = None;
        for (page, entry) in table.iter() {
            let Some(counter) = entry.counter() else {
                continue;
            };
            match oldest {
                Some((_, oldest_counter)) if counter <= oldest_counter => {}
                _ => oldest = Some((page, counter)),
            }
        }
        oldest.map(|(page, _)| page)
    }

    /// Finds a frame for a faulting page, evicting from `table` if needed.
    ///
    /// The caller still has to install the faulting page into the frame.
    pub fn acquire(&mut self, table: &mut PageTable) -> Result<FrameGrant, ReplacementError> {
        if let Some(frame) = self.allocator.allocate_frame() {
            debug!("Allocated free frame {}", frame);
            return Ok(FrameGrant::Free(frame));
        }
        let victim = Self::select_victim(table).ok_or(ReplacementError::NoVictim)?;
        let frame = table.evict(victim).ok_or(ReplacementError::NoVictim)?;
        debug!("Evicted page {} from frame {}", victim, frame);
        Ok(FrameGrant::Evicted { frame, victim })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(table: &mut PageTable, page: PageNumber) {
        table.touch(page);
        table.age_others(page);
    }

    #[test]
    fn allocates_fresh_frames_before_evicting() {
        let mut table = PageTable::init();
        let mut policy = ReplacementPolicy::new(3);
        for page in [10, 20, 30] {
            let grant = policy.acquire(&mut table).unwrap();
            assert_eq!(grant.victim(), None);
            table.install(page, grant.frame());
            step(&mut table, page);
        }
        assert!(policy.is_saturated());
        assert_eq!(table.lookup(10), Some(0));
        assert_eq!(table.lookup(30), Some(2));
    }

    #[test]
    fn evicts_least_recently_touched_page() {
        let mut table = PageTable::init();
        let mut policy = ReplacementPolicy::new(3);
        for page in [10, 20, 30] {
            let frame = policy.acquire(&mut table).unwrap().frame();
            table.install(page, frame);
            step(&mut table, page);
        }
        step(&mut table, 10);

        let grant = policy.acquire(&mut table).unwrap();
        assert_eq!(grant, FrameGrant::Evicted { frame: 1, victim: 20 });
        assert!(!table.entry(20).is_valid());
        assert_eq!(table.resident_count(), 2);
    }

    #[test]
    fn ties_go_to_lowest_page() {
        let mut table = PageTable::init();
        table.install(40, 0);
        table.install(7, 1);
        table.install(90, 2);
        table.age_others(90);
        assert_eq!(table.entry(40).counter(), table.entry(7).counter());
        assert_eq!(ReplacementPolicy::select_victim(&table), Some(7));
    }

    #[test]
    fn invalid_page_zero_is_never_chosen() {
        let mut table = PageTable::init();
        table.install(1, 0);
        table.install(2, 1);
        step(&mut table, 2);
        assert!(!table.entry(0).is_valid());
        assert_eq!(ReplacementPolicy::select_victim(&table), Some(1));
    }

    #[test]
    fn valid_page_zero_with_zero_counter_loses() {
        let mut table = PageTable::init();
        table.install(0, 0);
        table.install(5, 1);
        step(&mut table, 0);
        assert_eq!(table.entry(0).counter(), Some(0));
        assert_eq!(table.entry(5).counter(), Some(1));
        assert_eq!(ReplacementPolicy::select_victim(&table), Some(5));
    }

    #[test]
    fn empty_table_has_no_victim() {
        let mut table = PageTable::init();
        let mut policy = ReplacementPolicy::new(0);
        assert_eq!(ReplacementPolicy::select_victim(&table), None);
        assert_eq!(policy.acquire(&mut table), Err(ReplacementError::NoVictim));
    }

    #[test]
    fn resident_count_never_exceeds_frames() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let mut table = PageTable::init();
        let mut policy = ReplacementPolicy::new(16);
        for _ in 0..2000 {
            let page: PageNumber = rng.gen();
            if table.lookup(page).is_none() {
                let before = table.resident_count();
                let grant = policy.acquire(&mut table).unwrap();
                if let Some(victim) = grant.victim() {
                    assert!(policy.is_saturated());
                    assert_eq!(table.resident_count(), before - 1);
                    assert_ne!(victim, page);
                }
                table.install(page, grant.frame());
            }
            step(&mut table, page);
            assert!(table.resident_count() <= 16);
        }
        assert_eq!(table.resident_count(), 16);
    }
}
