pub mod address;
pub mod page_table;
pub mod replacement;
pub mod ring_buffer;
pub mod tlb;

pub use address::{decode, LogicalAddress, PhysicalAddress};
pub use page_table::{FrameAllocator, PageTable, PageTableEntry};
pub use replacement::{FrameGrant, ReplacementError, ReplacementPolicy};
pub use tlb::{Tlb, TlbEntry};

pub type PageNumber = u8;
pub type Offset = u8;
pub type FrameNumber = u32;

/// Bytes per page and per frame.
pub const PAGE_SIZE: usize = 256;
/// Entries in the page table; fixed regardless of how many frames exist.
pub const NUM_PAGES: usize = 256;
pub const TLB_SIZE: usize = 16;
