//! Register access engine: address resolution, the register primitives, the memory window
//! abstraction they run against, and the text rendering of register values.
//!
//! ```text
//! "w 0xd24 3" --> Invocation --> Command -----------------\
//!                      \                                   > RegisterOperation --> RegisterOutcome
//!                       raw address --> AddressResolver --/         |                    |
//!                                             |                     v                    v
//!                                         page_base --> PageMapper --> MemoryWindow   RegisterReport
//! ```

mod bit_field_formatter;
mod memory_window;
mod num_parse;
mod reg_address;
mod reg_command;
pub mod reg_definitions;
mod reg_errors;
mod reg_operation;

pub use bit_field_formatter::*;
pub use memory_window::*;
pub use num_parse::*;
pub use reg_address::*;
pub use reg_command::*;
pub use reg_definitions::*;
pub use reg_errors::*;
pub use reg_operation::*;
