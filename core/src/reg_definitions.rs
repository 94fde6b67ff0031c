//! This module contains constant definitions used by other modules and crates.

/// Size in bytes of the physical memory window mapped for every register access
pub const PAGE_SIZE: usize = 0x1000;

/// Mask of the in-page bits of an address
pub const PAGE_MASK: u32 = (PAGE_SIZE as u32) - 1;

/// Mask of the sub-word bits of an address; register accesses are always 4-byte aligned
pub const WORD_MASK: u32 = 0x3;

/// Size in bytes of a register access
pub const WORD_SIZE: usize = 4;

/// Highest valid offset of a register inside the mapped page
pub const MAX_PAGE_OFFSET: usize = PAGE_SIZE - WORD_SIZE;

/// Register base of the Omega2 (MT7688) SoC, merged into every resolved address by default
pub const DEFAULT_REG_BASE: u32 = 0x1000_0000;

/// Physical memory special file
pub const DEFAULT_DEVICE: &str = "/dev/mem";
