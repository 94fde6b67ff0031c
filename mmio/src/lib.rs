//! Register windows backed by the physical memory device.
//!
//! This is the only crate of the workspace with `unsafe` code: one page of the device is
//! mapped with `mmap(2)` and accessed with volatile loads and stores.

mod dev_mem;

pub use dev_mem::*;
