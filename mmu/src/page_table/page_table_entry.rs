use crate::FrameNumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Resident {
    frame: FrameNumber,
    counter: u32,
}

/// Maps one page to the frame holding it.
///
/// A valid entry always has both a frame and an aging counter; an invalid
/// entry has neither. The counter counts processed addresses since the page
/// was last accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageTableEntry {
    resident: Option<Resident>,
}

impl PageTableEntry {
    pub fn is_valid(&self) -> bool {
        self.resident.is_some()
    }

    pub fn frame(&self) -> Option<FrameNumber> {
        self.resident.map(|r| r.frame)
    }

    pub fn counter(&self) -> Option<u32> {
        self.resident.map(|r| r.counter)
    }

    pub(super) fn install(&mut self, frame: FrameNumber) {
        self.resident = Some(Resident { frame, counter: 0 });
    }

    pub(super) fn clear(&mut self) -> Option<FrameNumber> {
        self.resident.take().map(|r| r.frame)
    }

    pub(super) fn reset_counter(&mut self) {
        if let Some(resident) = self.resident.as_mut() {
            resident.counter = 0;
        }
    }

    pub(super) fn age(&mut self) {
        if let Some(resident) = self.resident.as_mut() {
            resident.counter = resident.counter.saturating_add(1);
        }
    }
}
