use std::fmt;

/// Size of one frame in bytes; equal to the page size.
pub const FRAME_SIZE: usize = 256;

#[derive(Debug, PartialEq)]
pub enum MemoryError {
    /// Physical address beyond the last frame.
    OverCapacity,
    InvalidFrame(u32),
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::OverCapacity => write!(f, "physical address out of range"),
            MemoryError::InvalidFrame(frame) => write!(f, "frame {} does not exist", frame),
        }
    }
}

impl std::error::Error for MemoryError {}

/// A fixed pool of frames, all zeroed at creation.
#[derive(Clone)]
pub struct PhysicalMemory {
    frames: Vec<[u8; FRAME_SIZE]>,
}

impl PhysicalMemory {
    pub fn new(num_frames: usize) -> Self {
        Self {
            frames: vec![[0; FRAME_SIZE]; num_frames],
        }
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn capacity(&self) -> usize {
        self.frames.len() * FRAME_SIZE
    }

    pub fn check_address(&self, address: u32) -> Result<(), MemoryError> {
        if address as usize >= self.capacity() {
            return Err(MemoryError::OverCapacity);
        }
        Ok(())
    }

    fn frame(&self, frame: u32) -> Result<&[u8; FRAME_SIZE], MemoryError> {
        self.frames
            .get(frame as usize)
            .ok_or(MemoryError::InvalidFrame(frame))
    }

    pub fn write_frame(&mut self, frame: u32, bytes: &[u8; FRAME_SIZE]) -> Result<(), MemoryError> {
        let slot = self
            .frames
            .get_mut(frame as usize)
            .ok_or(MemoryError::InvalidFrame(frame))?;
        slot.copy_from_slice(bytes);
        Ok(())
    }

    pub fn read_frame(&self, frame: u32) -> Result<&[u8], MemoryError> {
        Ok(self.frame(frame)?.as_slice())
    }

    pub fn read(&self, frame: u32, offset: u8) -> Result<u8, MemoryError> {
        Ok(self.frame(frame)?[offset as usize])
    }

    /// Reads the byte at `frame * FRAME_SIZE + offset`.
    pub fn read_u8(&self, address: u32) -> Result<u8, MemoryError> {
        self.check_address(address)?;
        let frame = address as usize / FRAME_SIZE;
        Ok(self.frames[frame][address as usize % FRAME_SIZE])
    }

    pub fn read_i8(&self, address: u32) -> Result<i8, MemoryError> {
        Ok(self.read_u8(address)? as i8)
    }
}
