use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::constants::PAGE_SIZE;
use crate::error::{PagerError, Result};

/// Read-only source of page content for demand paging.
///
/// A page is read in full before any bookkeeping is updated, so a failed
/// read never leaves a partially loaded page mapped.
pub trait PageSource {
    /// Read exactly one page of bytes for `page`.
    fn page_in(&mut self, page: usize) -> Result<[u8; PAGE_SIZE]>;
}

/// File-backed store holding the complete virtual address space, addressed
/// by `page * PAGE_SIZE`. The handle is held for the duration of the run;
/// faults never overlap.
#[derive(Debug)]
pub struct BackingStore {
    file: File,
}

impl BackingStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(PagerError::BackingStore)?;
        Ok(BackingStore { file })
    }
}

impl PageSource for BackingStore {
    fn page_in(&mut self, page: usize) -> Result<[u8; PAGE_SIZE]> {
        let mut buf = [0u8; PAGE_SIZE];
        self.file
            .seek(SeekFrom::Start((page * PAGE_SIZE) as u64))
            .map_err(PagerError::BackingStore)?;
        self.file
            .read_exact(&mut buf)
            .map_err(PagerError::BackingStore)?;
        Ok(buf)
    }
}
