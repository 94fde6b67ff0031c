use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while parsing a register command or executing it against a memory window
#[derive(Debug, Error)]
pub enum RegMemError {
    #[error("invalid address- {0}")]
    InvalidAddress(String),

    #[error("invalid number- {0}")]
    InvalidValue(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("incomplete command: missing {0}")]
    MissingArgument(&'static str),

    #[error("unexpected argument '{0}' (one command per invocation)")]
    UnexpectedArgument(String),

    #[error("register base {0:#010x} is not word aligned")]
    UnalignedRegBase(u32),

    #[error("failed to open {}: {source}", .path.display())]
    DeviceOpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to mmap {} at page {page_base:#010x}: {source}", .path.display())]
    MapFailure {
        path: PathBuf,
        page_base: u32,
        #[source]
        source: io::Error,
    },

    #[error("failed to unmap page {page_base:#010x}: {source}")]
    UnmapFailure {
        page_base: u32,
        #[source]
        source: io::Error,
    },

    #[error("offset {offset:#x} is not a word-aligned offset inside a {size}-byte window")]
    OffsetOutOfWindow { offset: usize, size: usize },
}

/// Coarse classification of a [`RegMemError`], used to pick the process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The command line was malformed; the device was never touched
    Usage,
    /// The register operation could not be carried out
    Operation,
    /// The register operation took effect but releasing the mapping failed
    Cleanup,
}

impl ErrorClass {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorClass::Operation => 1,
            ErrorClass::Usage => 2,
            ErrorClass::Cleanup => 3,
        }
    }
}

impl RegMemError {
    pub fn class(&self) -> ErrorClass {
        match self {
            RegMemError::InvalidAddress(_)
            | RegMemError::InvalidValue(_)
            | RegMemError::UnknownCommand(_)
            | RegMemError::MissingArgument(_)
            | RegMemError::UnexpectedArgument(_)
            | RegMemError::UnalignedRegBase(_) => ErrorClass::Usage,
            RegMemError::DeviceOpenFailure { .. }
            | RegMemError::MapFailure { .. }
            | RegMemError::OffsetOutOfWindow { .. } => ErrorClass::Operation,
            RegMemError::UnmapFailure { .. } => ErrorClass::Cleanup,
        }
    }
}

pub type RegMemResult<T> = Result<T, RegMemError>;
