//! Register address resolution.
//!
//! A raw address given by the operator is turned into the physical address actually accessed,
//! the base of the page that has to be mapped and the offset of the register inside that page:
//!
//! ```text
//! raw --> & !WORD_MASK --> | reg_base --> address
//!                                           |--> & !PAGE_MASK --> page_base
//!                                           \--> - page_base  --> offset
//! ```
//!
//! The register base is merged with a bitwise OR, not added. An absolute address whose bits
//! already include the base resolves to itself, and a short offset such as `0xd24` resolves to
//! `reg_base + 0xd24`. Raw addresses with bits that overlap the base in other ways resolve to
//! neither the raw value nor the sum; existing register maps rely on this behavior.

use std::fmt;

use crate::{RegMemError, RegMemResult, DEFAULT_REG_BASE, PAGE_MASK, WORD_MASK};

/// Result of resolving a raw address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAddress {
    /// Word-aligned physical address, register base included
    pub address: u32,
    /// Page-aligned physical address of the page containing `address`
    pub page_base: u32,
    /// Byte offset of `address` inside the page, always in `0..=MAX_PAGE_OFFSET`
    pub offset: usize,
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x} (page {:#010x} + {:#05x})", self.address, self.page_base, self.offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressResolver {
    reg_base: u32,
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::new(DEFAULT_REG_BASE)
    }
}

impl AddressResolver {
    /// Builds a resolver for a base accepted by [`check_reg_base`]
    pub const fn new(reg_base: u32) -> Self {
        debug_assert!(reg_base & WORD_MASK == 0, "register base must be word aligned");
        Self { reg_base }
    }

    pub fn reg_base(&self) -> u32 {
        self.reg_base
    }

    pub fn resolve(&self, raw: u32) -> ResolvedAddress {
        let address = (raw & !WORD_MASK) | self.reg_base;
        let page_base = address & !PAGE_MASK;
        let offset = (address - page_base) as usize;

        ResolvedAddress { address, page_base, offset }
    }
}

/// Checks that a register base keeps its sub-word bits clear.
///
/// The base is merged after the raw address is aligned, so any low bit set in it would end up
/// in every resolved address.
pub fn check_reg_base(reg_base: u32) -> RegMemResult<u32> {
    if reg_base & WORD_MASK != 0 {
        return Err(RegMemError::UnalignedRegBase(reg_base));
    }
    Ok(reg_base)
}
