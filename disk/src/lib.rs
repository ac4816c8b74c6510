use std::{
    fmt,
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::Path,
};

use log::{info, warn};

/// Size of one page record in the backing store.
pub const PAGE_SIZE: usize = 256;
/// Number of page records addressable by an 8-bit page number.
pub const PAGE_COUNT: usize = 256;

#[derive(Debug, PartialEq)]
pub enum DiskError {
    /// The store ended before a full page could be read.
    ShortRead { page: u8 },
    Io { page: u8, kind: io::ErrorKind },
}

impl fmt::Display for DiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskError::ShortRead { page } => {
                write!(f, "backing store has no full record for page {}", page)
            }
            DiskError::Io { page, kind } => {
                write!(f, "failed to read page {} from backing store: {}", page, kind)
            }
        }
    }
}

impl std::error::Error for DiskError {}

/// Read-only page-indexed view over a secondary store.
///
/// Page `n` lives at byte offset `n * PAGE_SIZE`. The store is never written,
/// so repeated reads of one page return the same bytes for the whole run.
#[derive(Debug)]
pub struct BackingStore<R = File> {
    source: R,
}

impl BackingStore<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let path = path.as_ref();
        let file = File::options().read(true).open(path)?;
        let len = file.metadata()?.len();
        info!("Opened backing store {} ({} bytes)", path.display(), len);
        if len < (PAGE_SIZE * PAGE_COUNT) as u64 {
            warn!(
                "Backing store {} covers only {} of {} pages",
                path.display(),
                len / PAGE_SIZE as u64,
                PAGE_COUNT
            );
        }
        Ok(Self { source: file })
    }
}

impl<R: Read + Seek> BackingStore<R> {
    pub fn from_reader(source: R) -> Self {
        Self { source }
    }

    pub fn read_page(&mut self, page: u8) -> Result<Box<[u8; PAGE_SIZE]>, DiskError> {
        let offset = page as u64 * PAGE_SIZE as u64;
        self.source
            .seek(SeekFrom::Start(offset))
            .map_err(|e| DiskError::Io {
                page,
                kind: e.kind(),
            })?;
        let mut buf = Box::new([0; PAGE_SIZE]);
        self.source.read_exact(&mut *buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => DiskError::ShortRead { page },
            kind => DiskError::Io { page, kind },
        })?;
        Ok(buf)
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}
