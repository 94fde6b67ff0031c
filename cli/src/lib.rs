//! Command-line front end of `devmem`.
//!
//! Parsing, configuration and output live here; the binary only wires them to the process
//! (stdout, exit status) and to the real physical memory device.

mod devmem_args;
mod runner;
mod session;
mod usage;

pub use devmem_args::*;
pub use runner::*;
pub use session::*;
pub use usage::*;

pub const PROGRAM_NAME: &str = "devmem";

pub const DEVMEM_VERSION_MESSAGE: &str =
    concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARGO_PKG_NAME"), ")");
