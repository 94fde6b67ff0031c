use tracing::debug;

use crate::{Command, MemoryWindow, RegMemResult, ResolvedAddress};

/// What a register operation observed or left behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Value loaded by a read
    Read(u32),
    /// Value stored by a write, setbits or clrbits
    Stored(u32),
}

impl RegisterOutcome {
    pub fn value(&self) -> u32 {
        match self {
            RegisterOutcome::Read(value) | RegisterOutcome::Stored(value) => *value,
        }
    }
}

/// One command bound to one resolved register address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterOperation {
    pub command: Command,
    pub target: ResolvedAddress,
}

impl RegisterOperation {
    pub fn new(command: Command, target: ResolvedAddress) -> Self {
        Self { command, target }
    }

    /// Runs the command against a window mapping the target's page.
    ///
    /// Success means the access itself went through; the register is not read back.
    pub fn execute<W: MemoryWindow + ?Sized>(
        &self,
        window: &mut W,
    ) -> RegMemResult<RegisterOutcome> {
        debug_assert_eq!(window.page_base(), self.target.page_base);

        let offset = self.target.offset;
        let outcome = match self.command {
            Command::Read(_) => RegisterOutcome::Read(window.load32(offset)?),
            Command::Write(value) => {
                window.store32(offset, value)?;
                RegisterOutcome::Stored(value)
            }
            Command::SetBits(mask) => RegisterOutcome::Stored(window.or32(offset, mask)?),
            Command::ClearBits(mask) => RegisterOutcome::Stored(window.and_not32(offset, mask)?),
        };

        debug!("{} at {}: {:#010x}", self.command.name(), self.target, outcome.value());
        Ok(outcome)
    }
}
