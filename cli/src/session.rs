use std::io::Write;

use anyhow::{Context, Result};
use regmem_core::{
    AddressResolver, Command, Invocation, PageMapper, RegisterOperation, RegisterOutcome,
    RegisterReport,
};

/// Runs one invocation: maps the register's page, applies the command, prints the value of a
/// read to `out` and releases the page.
///
/// The page is released on every path once it is mapped. A failed release after the
/// operation took effect is reported as an `UnmapFailure`, after anything printed.
pub fn execute<M: PageMapper, W: Write>(
    mapper: &M,
    resolver: &AddressResolver,
    invocation: &Invocation,
    out: &mut W,
) -> Result<RegisterOutcome> {
    let target = resolver.resolve(invocation.raw_address);
    let operation = RegisterOperation::new(invocation.command, target);
    tracing::debug!(
        "{} {:#010x} (base {:#010x}) -> {target}",
        invocation.command.name(),
        invocation.raw_address,
        resolver.reg_base()
    );

    let mut window = mapper.map_page(target.page_base)?;

    let outcome = match operation.execute(&mut window) {
        Ok(outcome) => outcome,
        Err(err) => {
            if let Err(release_err) = mapper.unmap_page(window) {
                tracing::warn!("{release_err}");
            }
            return Err(err.into());
        }
    };

    let printed = match (invocation.command, outcome) {
        (Command::Read(format), RegisterOutcome::Read(value)) => {
            write!(out, "{}", RegisterReport::new(target.address, value, format))
                .and_then(|_| out.flush())
        }
        _ => Ok(()),
    };

    let released = mapper.unmap_page(window);
    if let Err(print_err) = printed {
        if let Err(release_err) = released {
            tracing::warn!("{release_err}");
        }
        return Err(print_err).context("Failed to print the register value");
    }
    released?;

    Ok(outcome)
}
