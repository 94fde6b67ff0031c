//! Memory windows: one page of physical memory seen through 32-bit loads and stores.
//!
//! A [`MemoryWindow`] is a page that is currently accessible. A [`PageMapper`] hands out windows
//! for a page base and takes them back; the window is gone once it is handed back, so every
//! mapping is released exactly once.
//!
//! Every access is bounds-checked with [`check_offset`] before it reaches memory, so an
//! implementation only has to care about the in-page access itself.

use crate::{RegMemError, RegMemResult, MAX_PAGE_OFFSET, PAGE_SIZE, WORD_SIZE};

pub trait MemoryWindow {
    /// Physical address of the first byte of the window
    fn page_base(&self) -> u32;

    /// Loads the 32-bit word at `offset`, in native byte order
    fn load32(&self, offset: usize) -> RegMemResult<u32>;

    /// Stores a 32-bit word at `offset`, in native byte order
    fn store32(&mut self, offset: usize, value: u32) -> RegMemResult<()>;

    /// Sets the bits of `mask` in the word at `offset` and returns the stored value.
    ///
    /// This is a load followed by a store, not an atomic operation: another agent writing the
    /// same register in between is overwritten.
    fn or32(&mut self, offset: usize, mask: u32) -> RegMemResult<u32> {
        let value = self.load32(offset)? | mask;
        self.store32(offset, value)?;
        Ok(value)
    }

    /// Clears the bits of `mask` in the word at `offset` and returns the stored value.
    fn and_not32(&mut self, offset: usize, mask: u32) -> RegMemResult<u32> {
        let value = self.load32(offset)? & !mask;
        self.store32(offset, value)?;
        Ok(value)
    }
}

pub trait PageMapper {
    type Window<'a>: MemoryWindow
    where
        Self: 'a;

    /// Maps the page starting at `page_base`
    fn map_page(&self, page_base: u32) -> RegMemResult<Self::Window<'_>>;

    /// Releases a window returned by [`PageMapper::map_page`]
    fn unmap_page(&self, window: Self::Window<'_>) -> RegMemResult<()>;
}

/// Checks that a 4-byte access at `offset` is word aligned and fits in one page
pub fn check_offset(offset: usize) -> RegMemResult<()> {
    if offset % WORD_SIZE != 0 || offset > MAX_PAGE_OFFSET {
        return Err(RegMemError::OffsetOutOfWindow { offset, size: PAGE_SIZE });
    }
    Ok(())
}

/// A page of plain memory, used where no hardware is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBuffer {
    page_base: u32,
    bytes: Box<[u8]>,
}

impl PageBuffer {
    pub fn new(page_base: u32) -> Self {
        Self { page_base, bytes: vec![0u8; PAGE_SIZE].into_boxed_slice() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl MemoryWindow for PageBuffer {
    fn page_base(&self) -> u32 {
        self.page_base
    }

    fn load32(&self, offset: usize) -> RegMemResult<u32> {
        check_offset(offset)?;
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(&self.bytes[offset..offset + WORD_SIZE]);
        Ok(u32::from_ne_bytes(word))
    }

    fn store32(&mut self, offset: usize, value: u32) -> RegMemResult<()> {
        check_offset(offset)?;
        self.bytes[offset..offset + WORD_SIZE].copy_from_slice(&value.to_ne_bytes());
        Ok(())
    }
}
