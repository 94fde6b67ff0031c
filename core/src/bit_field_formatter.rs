//! Text rendering of a register value.
//!
//! The verbose report lines every bit up under its bit position and every byte under its
//! eight bits:
//!
//! ```text
//!
//! addr: [0x10000D24] val: [0x12345678]
//!
//! bit 3 3 2 2 2 2 2 2  2 2 2 2 1 1 1 1  1 1 1 1 1 1
//! pos 1 0 9 8 7 6 5 4  3 2 1 0 9 8 7 6  5 4 3 2 1 0 9 8  7 6 5 4 3 2 1 0
//!     ...............  ...............  ...............  ...............
//! bin 0 0 0 1 0 0 1 0  0 0 1 1 0 1 0 0  0 1 0 1 0 1 1 0  0 1 1 1 1 0 0 0
//! hex            0x12             0x34             0x56             0x78
//! dec              18               52               86              120
//!
//! ```
//!
//! Each of the four byte clusters is 15 columns wide and clusters are separated by two spaces.
//! Downstream scripts scrape this layout, so column widths and separators must not change.

use std::fmt;

use crate::ReadFormat;

const BITS: u32 = u32::BITS;
const BITS_PER_BYTE: u32 = 8;
const CLUSTER_WIDTH: usize = 15;
const CLUSTER_GAP: &str = "  ";

/// A register value ready to be printed in one of the read formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterReport {
    pub address: u32,
    pub value: u32,
    pub format: ReadFormat,
}

impl RegisterReport {
    pub fn new(address: u32, value: u32, format: ReadFormat) -> Self {
        Self { address, value, format }
    }

    fn fmt_binary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b ")?;
        for bit in (0..BITS).rev() {
            write!(f, "{}", (self.value >> bit) & 1)?;
            if bit % BITS_PER_BYTE == 0 {
                write!(f, " ")?;
            }
        }
        writeln!(f)
    }

    fn fmt_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "addr: [0x{:08X}] val: [0x{:08X}]", self.address, self.value)?;
        writeln!(f)?;
        writeln!(f, "bit {}", bit_row(|bit| digit_or_blank(bit / 10)).trim_end())?;
        writeln!(f, "pos {}", bit_row(|bit| char::from(b'0' + (bit % 10) as u8)).trim_end())?;
        writeln!(f, "    {}", [".".repeat(CLUSTER_WIDTH).as_str(); 4].join(CLUSTER_GAP))?;
        writeln!(f, "bin {}", bit_row(|bit| bit_char(self.value, bit)))?;

        // byte3 first, right-aligned under the cluster holding its bits
        let bytes = self.value.to_be_bytes();
        let hex: Vec<String> = bytes
            .iter()
            .map(|b| format!("{:>w$}", format!("0x{b:02X}"), w = CLUSTER_WIDTH))
            .collect();
        let dec: Vec<String> =
            bytes.iter().map(|b| format!("{b:>w$}", w = CLUSTER_WIDTH)).collect();
        writeln!(f, "hex {}", hex.join(CLUSTER_GAP))?;
        writeln!(f, "dec {}", dec.join(CLUSTER_GAP))?;
        writeln!(f)
    }
}

impl fmt::Display for RegisterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            ReadFormat::Dec => writeln!(f, "{}", self.value),
            ReadFormat::Hex => writeln!(f, "0x{:08X}", self.value),
            ReadFormat::Bin => self.fmt_binary(f),
            ReadFormat::Verbose => self.fmt_verbose(f),
        }
    }
}

/// One character per bit, most significant first, each followed by a space, with an extra
/// space closing every byte cluster
fn bit_row(cell: impl Fn(u32) -> char) -> String {
    let mut row = String::with_capacity(2 * BITS as usize + 4);
    for bit in (0..BITS).rev() {
        row.push(cell(bit));
        row.push(' ');
        if bit % BITS_PER_BYTE == 0 {
            row.push(' ');
        }
    }
    row
}

fn bit_char(value: u32, bit: u32) -> char {
    if (value >> bit) & 1 == 1 {
        '1'
    } else {
        '0'
    }
}

fn digit_or_blank(digit: u32) -> char {
    match digit {
        0 => ' ',
        d => char::from(b'0' + d as u8),
    }
}
