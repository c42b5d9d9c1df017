use serde::Serialize;
use std::num::NonZeroU32;
use std::ops::RangeInclusive;

/// A contiguous run of pages that becomes one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// 0-based position; also the index into the name list
    pub index: usize,
    /// 1-based, inclusive
    pub first_page: u32,
    /// 1-based, inclusive
    pub last_page: u32,
}

impl Chunk {
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.first_page..=self.last_page
    }

    pub fn page_count(&self) -> u32 {
        self.last_page - self.first_page + 1
    }
}

/// The ordered chunks covering a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    total_pages: u32,
    pages_per_file: NonZeroU32,
}

impl ChunkPlan {
    pub fn new(total_pages: u32, pages_per_file: NonZeroU32) -> Self {
        ChunkPlan {
            total_pages,
            pages_per_file,
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Number of output files: ceil(total_pages / pages_per_file)
    pub fn file_count(&self) -> usize {
        self.total_pages.div_ceil(self.pages_per_file.get()) as usize
    }

    /// The chunk at `index`, or `None` past the end of the document.
    pub fn chunk(&self, index: usize) -> Option<Chunk> {
        if index >= self.file_count() {
            return None;
        }

        let per_file = u64::from(self.pages_per_file.get());
        let start = index as u64 * per_file; // 0-based
        let end = (start + per_file).min(u64::from(self.total_pages)); // exclusive

        Some(Chunk {
            index,
            first_page: start as u32 + 1,
            last_page: end as u32,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Chunk> + '_ {
        (0..self.file_count()).filter_map(move |index| self.chunk(index))
    }
}
