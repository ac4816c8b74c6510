//! Per-address translation pipeline.
//!
//! Each address is decoded, looked up in the TLB, then in the page table,
//! and on a miss in both the page is loaded from the backing store into a
//! free or reclaimed frame. The byte at the resulting physical address is
//! read back from physical memory. Addresses are processed strictly in
//! order because the aging counters measure time in processed addresses.


use std::{
    fmt,
    fs::File,
    io::{Read, Seek},
};

use disk::{BackingStore, DiskError, PAGE_SIZE};
use log::{debug, info, warn};
use memory::{MemoryError, PhysicalMemory};
use mmu::{
    FrameGrant, FrameNumber, LogicalAddress, PageNumber, PageTable, PhysicalAddress,
    ReplacementError, ReplacementPolicy, Tlb,
};

use crate::{
    config::{EngineConfig, ReadFailurePolicy, StaleTlbPolicy},
    stats::Statistics,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TlbHit,
    /// TLB miss, but the page was already resident.
    PageTableHit,
    PageFault { evicted: Option<PageNumber> },
}

/// The result of translating one logical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub address: LogicalAddress,
    pub physical: PhysicalAddress,
    pub value: i8,
    pub outcome: Outcome,
}

#[derive(Debug, PartialEq)]
pub enum EngineError {
    BackingStore(DiskError),
    Memory(MemoryError),
    Replacement(ReplacementError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::BackingStore(e) => write!(f, "page fault failed: {}", e),
            EngineError::Memory(e) => write!(f, "physical memory access failed: {}", e),
            EngineError::Replacement(e) => write!(f, "page replacement failed: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::BackingStore(e) => Some(e),
            EngineError::Memory(e) => Some(e),
            EngineError::Replacement(e) => Some(e),
        }
    }
}

impl From<DiskError> for EngineError {
    fn from(e: DiskError) -> Self {
        EngineError::BackingStore(e)
    }
}

impl From<MemoryError> for EngineError {
    fn from(e: MemoryError) -> Self {
        EngineError::Memory(e)
    }
}

impl From<ReplacementError> for EngineError {
    fn from(e: ReplacementError) -> Self {
        EngineError::Replacement(e)
    }
}

pub struct TranslationEngine<R = File> {
    config: EngineConfig,
    store: BackingStore<R>,
    memory: PhysicalMemory,
    page_table: PageTable,
    tlb: Tlb,
    replacement: ReplacementPolicy,
    stats: Statistics,
}

impl<R: Read + Seek> TranslationEngine<R> {
    pub fn new(store: BackingStore<R>, config: EngineConfig) -> Self {
        Self {
            config,
            store,
            memory: PhysicalMemory::new(config.frames),
            page_table: PageTable::init(),
            tlb: Tlb::new(),
            replacement: ReplacementPolicy::new(config.frames),
            stats: Statistics::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    /// Translates every address in order, stopping at the first error.
    pub fn run<I>(&mut self, addresses: I) -> Result<Vec<Translation>, EngineError>
    where
        I: IntoIterator<Item = LogicalAddress>,
    {
        let addresses = addresses.into_iter();
        let mut translations = Vec::with_capacity(addresses.size_hint().0);
        for address in addresses {
            translations.push(self.translate(address)?);
        }
        info!(
            "Translated {} addresses: {} faults, {} TLB hits, {} evictions",
            self.stats.total, self.stats.faults, self.stats.tlb_hits, self.stats.evictions
        );
        Ok(translations)
    }

    pub fn translate(&mut self, address: LogicalAddress) -> Result<Translation, EngineError> {
        let (page, offset) = address.decode();

        let (frame, outcome) = match self.tlb.lookup(page) {
            Some(frame) => (frame, Outcome::TlbHit),
            None => {
                let (frame, outcome) = match self.page_table.lookup(page) {
                    Some(frame) => (frame, Outcome::PageTableHit),
                    None => {
                        let grant = self.handle_fault(page)?;
                        (
                            grant.frame(),
                            Outcome::PageFault {
                                evicted: grant.victim(),
                            },
                        )
                    }
                };
                self.tlb.insert(page, frame);
                (frame, outcome)
            }
        };

        self.page_table.touch(page);
        self.page_table.age_others(page);

        let physical = PhysicalAddress::new(frame, offset);
        let value = self.memory.read_i8(physical.0)?;
        self.stats.record(&outcome);

        Ok(Translation {
            address,
            physical,
            value,
            outcome,
        })
    }

    fn handle_fault(&mut self, page: PageNumber) -> Result<FrameGrant, EngineError> {
        let bytes = self.load_page(page)?;
        let grant = self.replacement.acquire(&mut self.page_table)?;
        if let Some(victim) = grant.victim() {
            self.drop_stale_tlb_entries(victim);
        }
        let frame: FrameNumber = grant.frame();
        self.memory.write_frame(frame, &bytes)?;
        self.page_table.install(page, frame);
        debug!("Page fault: page {} loaded into frame {}", page, frame);
        Ok(grant)
    }

    fn load_page(&mut self, page: PageNumber) -> Result<Box<[u8; PAGE_SIZE]>, EngineError> {
        match self.store.read_page(page) {
            Ok(bytes) => Ok(bytes),
            Err(e) => match self.config.read_failure {
                ReadFailurePolicy::Abort => Err(e.into()),
                ReadFailurePolicy::ZeroFill => {
                    warn!("{}; loading a zero-filled page instead", e);
                    self.stats.zero_filled += 1;
                    Ok(Box::new([0; PAGE_SIZE]))
                }
            },
        }
    }

    fn drop_stale_tlb_entries(&mut self, victim: PageNumber) {
        match self.config.stale_tlb {
            StaleTlbPolicy::Purge => {
                let purged = self.tlb.invalidate(victim);
                if purged > 0 {
                    debug!("Purged {} TLB entries for evicted page {}", purged, victim);
                }
            }
            StaleTlbPolicy::Keep => {}
        }
    }
}
