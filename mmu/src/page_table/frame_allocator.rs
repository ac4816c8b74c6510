use log::debug;

use crate::FrameNumber;

/// Hands out frames `0, 1, 2, ...` until the pool is used up.
///
/// Frames are never returned: once every frame has been handed out the
/// allocator stays saturated and faults must evict instead.
#[derive(Debug, Clone)]
pub struct FrameAllocator {
    next: FrameNumber,
    capacity: FrameNumber,
}

impl FrameAllocator {
    pub fn init(capacity: usize) -> Self {
        Self {
            next: 0,
            capacity: capacity as FrameNumber,
        }
    }

    pub fn allocate_frame(&mut self) -> Option<FrameNumber> {
        if self.is_saturated() {
            debug!("No free frames");
            return None;
        }
        let frame = self.next;
        self.next += 1;
        Some(frame)
    }

    pub fn is_saturated(&self) -> bool {
        self.next >= self.capacity
    }

    pub fn allocated(&self) -> usize {
        self.next as usize
    }

    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_frame() {
        let mut allocator = FrameAllocator::init(4);
        assert_eq!(allocator.allocate_frame(), Some(0));
        assert_eq!(allocator.allocate_frame(), Some(1));
        assert_eq!(allocator.allocated(), 2);
        assert!(!allocator.is_saturated());
    }

    #[test]
    fn test_allocate_frame_full() {
        let mut allocator = FrameAllocator::init(128);
        for i in 0..128 {
            assert_eq!(allocator.allocate_frame(), Some(i));
        }
        assert!(allocator.is_saturated());
        assert_eq!(allocator.allocate_frame(), None);
        assert_eq!(allocator.allocate_frame(), None);
        assert_eq!(allocator.allocated(), 128);
    }
}
