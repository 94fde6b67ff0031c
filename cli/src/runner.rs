use std::{io::Write, path::Path};

use anyhow::Result;
use colored::Colorize;
use regmem_common::BoardConfig;
use regmem_core::{Invocation, PageMapper, RegMemError, RegMemResult, RegisterOutcome};

use crate::{execute, usage, DevMemArgs, PROGRAM_NAME};

/// Exit status of anything that is not a [`RegMemError`], e.g. a bad configuration file
const GENERIC_FAILURE: u8 = 1;

/// Loads the board configuration and applies the command-line flags on top of it
pub fn load_config(args: &DevMemArgs) -> Result<BoardConfig> {
    let mut config = BoardConfig::load(args.config.as_deref())?;
    config.apply_cli_overrides(args.base, args.device.clone(), args.verbose);
    Ok(config)
}

/// Splits the positional words into the command word and its arguments
pub fn parse_invocation(args: &DevMemArgs) -> RegMemResult<Invocation> {
    let (word, rest) = args.words.split_first().ok_or(RegMemError::MissingArgument("command"))?;
    Invocation::parse(word, rest, args.format)
}

/// Parses the command line, opens the device with `open` and runs the command.
///
/// A malformed command line prints the usage text to `out` and fails before `open` is called,
/// so the device is never touched.
pub fn run<M, F, W>(
    args: &DevMemArgs,
    config: &BoardConfig,
    open: F,
    out: &mut W,
) -> Result<RegisterOutcome>
where
    M: PageMapper,
    F: FnOnce(&Path) -> RegMemResult<M>,
    W: Write,
{
    let invocation = match parse_invocation(args) {
        Ok(invocation) => invocation,
        Err(err) => {
            if let Err(write_err) = out.write_all(usage(PROGRAM_NAME, config.reg_base).as_bytes())
            {
                tracing::warn!("Failed to print usage: {write_err}");
            }
            return Err(err.into());
        }
    };

    let mapper = open(&config.device)?;
    execute(&mapper, &config.resolver(), &invocation, out)
}

/// Process exit status for a failed run: 1 operation, 2 usage, 3 cleanup
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<RegMemError>().map_or(GENERIC_FAILURE, |err| err.class().exit_code())
}

/// One-line diagnostic for a failed run
pub fn diagnostic(err: &anyhow::Error) -> String {
    match err.downcast_ref::<RegMemError>() {
        // already carries its source in the message
        Some(err) => err.to_string(),
        None => format!("{err:#}"),
    }
}

/// Prints the effective configuration to stderr
pub fn print_command_info(args: &DevMemArgs, config: &BoardConfig) {
    eprintln!("{} {}", format!("{: >12}", "Command").bright_green().bold(), args.words.join(" "));
    eprintln!("{} {}", format!("{: >12}", "Device").bright_green().bold(), config.device.display());
    eprintln!("{} 0x{:08X}", format!("{: >12}", "Reg base").bright_green().bold(), config.reg_base);
    eprintln!("{} {}", format!("{: >12}", "Read format").bright_green().bold(), args.format);
    eprintln!(
        "{} {} ({})",
        format!("{: >12}", "Logging").bright_green().bold(),
        config.logging.level,
        config.logging.format
    );
    eprintln!();
}
