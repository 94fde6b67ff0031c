//! Ambient services shared by the register tools: board configuration and logging.

pub mod board_config;
pub mod logging;

pub use board_config::*;
pub use logging::*;
