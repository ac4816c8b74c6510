use crate::{FrameNumber, Offset, PageNumber, PAGE_SIZE};

const OFFSET_BITS: u32 = 8;
const MASK: u16 = 0xFF;

/// Splits a 16-bit logical address into its page number and offset.
pub fn decode(address: u16) -> (PageNumber, Offset) {
    (
        ((address >> OFFSET_BITS) & MASK) as PageNumber,
        (address & MASK) as Offset,
    )
}

/// A logical address as it appeared in the input.
///
/// The raw value is kept for reporting; decoding only looks at the low
/// 16 bits, so larger values wrap instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    raw: u32,
}

impl LogicalAddress {
    pub fn new(raw: u32) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> u32 {
        self.raw
    }

    pub fn decode(&self) -> (PageNumber, Offset) {
        decode(self.raw as u16)
    }

    pub fn page(&self) -> PageNumber {
        self.decode().0
    }

    pub fn offset(&self) -> Offset {
        self.decode().1
    }
}

impl From<u16> for LogicalAddress {
    fn from(address: u16) -> Self {
        Self::new(address as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhysicalAddress(pub u32);

impl PhysicalAddress {
    pub fn new(frame: FrameNumber, offset: Offset) -> Self {
        Self(frame * PAGE_SIZE as u32 + offset as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_splits_high_and_low_byte() {
        assert_eq!(decode(0), (0, 0));
        assert_eq!(decode(768), (3, 0));
        assert_eq!(decode(1023), (3, 255));
        assert_eq!(decode(0xABCD), (0xAB, 0xCD));
        assert_eq!(decode(u16::MAX), (255, 255));
    }

    #[test]
    fn decode_matches_shift_and_mask_for_all_addresses() {
        for address in 0..=u16::MAX {
            let (page, offset) = decode(address);
            assert_eq!(page as u16, (address >> 8) & 0xFF);
            assert_eq!(offset as u16, address & 0xFF);
        }
    }

    #[test]
    fn oversized_address_is_masked() {
        let address = LogicalAddress::new(65536 + 769);
        assert_eq!(address.raw(), 66305);
        assert_eq!(address.decode(), (3, 1));
    }

    #[test]
    fn physical_address() {
        assert_eq!(PhysicalAddress::new(0, 0), PhysicalAddress(0));
        assert_eq!(PhysicalAddress::new(2, 5), PhysicalAddress(517));
        assert_eq!(PhysicalAddress::new(255, 255), PhysicalAddress(65535));
    }
}
