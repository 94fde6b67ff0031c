use std::path::PathBuf;

use clap::Parser;
use regmem_core::{check_reg_base, parse_u32, ReadFormat};

use crate::DEVMEM_VERSION_MESSAGE;

#[derive(Parser, Debug)]
#[command(author, about, long_about = None, version = DEVMEM_VERSION_MESSAGE)]
#[command(name = "devmem")]
pub struct DevMemArgs {
    /// Command word and its numbers, e.g. `w 0xd24 3`.
    /// Commands: r(ead), h(ex), b(in), v(erbose), w(rite), s(etbits), c(lrbits).
    #[clap(value_name = "COMMAND ADDRESS [VALUE]", num_args = 0.., allow_hyphen_values = true)]
    pub words: Vec<String>,

    /// Board configuration file (toml)
    #[clap(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Register base merged into every address
    #[clap(short = 'b', long = "base", value_parser = parse_reg_base)]
    pub base: Option<u32>,

    /// Physical memory device
    #[clap(short = 'd', long = "device")]
    pub device: Option<PathBuf>,

    /// Output format of the plain `read` command: dec, hex, bin or verbose
    #[clap(short = 'f', long = "format", default_value_t = ReadFormat::Dec)]
    pub format: ReadFormat,

    #[clap(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level")]
    pub verbose: u8,
}

fn parse_reg_base(text: &str) -> Result<u32, String> {
    let reg_base = parse_u32(text).ok_or_else(|| format!("invalid 32-bit number '{text}'"))?;
    check_reg_base(reg_base).map_err(|err| err.to_string())
}
