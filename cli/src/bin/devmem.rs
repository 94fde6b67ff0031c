use std::{io, path::Path, process::ExitCode};

use clap::Parser;
use regmem_cli::{diagnostic, exit_code, load_config, print_command_info, run, DevMemArgs};
use regmem_mmio::DevMem;

fn main() -> ExitCode {
    let args = DevMemArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            println!("{}", diagnostic(&err));
            return ExitCode::from(exit_code(&err));
        }
    };

    if let Err(err) = regmem_common::init(&config.logging) {
        eprintln!("{err:#}");
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        print_command_info(&args, &config);
    }

    let result = run(&args, &config, |path: &Path| DevMem::open(path), &mut io::stdout().lock());

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{}", diagnostic(&err));
            ExitCode::from(exit_code(&err))
        }
    }
}
