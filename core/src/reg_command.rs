//! Register commands and their command-line form.
//!
//! | Command | Aliases    | Arguments     | Effect                                  |
//! |---------|------------|---------------|-----------------------------------------|
//! | read    | r          | addr          | print the value in the selected format  |
//! | hex     | h          | addr          | print the value as `0xXXXXXXXX`         |
//! | bin     | b          | addr          | print the value as grouped binary       |
//! | verbose | v          | addr          | print the bit field report              |
//! | write   | w          | addr value    | store value                             |
//! | setbits | sb, s      | addr bitmask  | OR bitmask into the value               |
//! | clrbits | cb, c      | addr bitmask  | AND-NOT bitmask out of the value        |

use std::{fmt, str::FromStr};

use crate::{parse_u32, RegMemError, RegMemResult};

/// Output format of a read command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFormat {
    #[default]
    Dec,
    Hex,
    Bin,
    Verbose,
}

impl FromStr for ReadFormat {
    type Err = RegMemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dec" | "decimal" => Ok(ReadFormat::Dec),
            "hex" => Ok(ReadFormat::Hex),
            "bin" | "binary" => Ok(ReadFormat::Bin),
            "verbose" => Ok(ReadFormat::Verbose),
            _ => Err(RegMemError::InvalidValue(s.to_string())),
        }
    }
}

impl fmt::Display for ReadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadFormat::Dec => "dec",
            ReadFormat::Hex => "hex",
            ReadFormat::Bin => "bin",
            ReadFormat::Verbose => "verbose",
        };
        f.write_str(name)
    }
}

/// One register primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Read(ReadFormat),
    Write(u32),
    SetBits(u32),
    ClearBits(u32),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Read(_) => "read",
            Command::Write(_) => "write",
            Command::SetBits(_) => "setbits",
            Command::ClearBits(_) => "clrbits",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Read(format) => write!(f, "read ({format})"),
            Command::Write(value) => write!(f, "write {value:#010x}"),
            Command::SetBits(mask) => write!(f, "setbits {mask:#010x}"),
            Command::ClearBits(mask) => write!(f, "clrbits {mask:#010x}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CommandWord {
    Read(Option<ReadFormat>),
    Write,
    SetBits,
    ClearBits,
}

impl CommandWord {
    fn lookup(word: &str) -> Option<Self> {
        match word {
            "read" | "r" => Some(CommandWord::Read(None)),
            "hex" | "h" => Some(CommandWord::Read(Some(ReadFormat::Hex))),
            "bin" | "b" => Some(CommandWord::Read(Some(ReadFormat::Bin))),
            "verbose" | "v" => Some(CommandWord::Read(Some(ReadFormat::Verbose))),
            "write" | "w" => Some(CommandWord::Write),
            "setbits" | "sb" | "s" => Some(CommandWord::SetBits),
            "clrbits" | "cb" | "c" => Some(CommandWord::ClearBits),
            _ => None,
        }
    }

    fn takes_value(self) -> bool {
        !matches!(self, CommandWord::Read(_))
    }
}

/// A fully validated command line: what to do and where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    /// Address as typed by the operator, before alignment and base merging
    pub raw_address: u32,
}

impl Invocation {
    /// Builds an invocation from a command word and its arguments.
    ///
    /// Everything is validated here, before the device is opened: an unknown word, a missing
    /// or malformed number, or a trailing argument is rejected without touching hardware.
    /// `read_format` is used by the plain `read` word; the `hex`, `bin` and `verbose` words
    /// select their own format.
    pub fn parse<S: AsRef<str>>(
        word: &str,
        args: &[S],
        read_format: ReadFormat,
    ) -> RegMemResult<Self> {
        let command_word =
            CommandWord::lookup(word).ok_or_else(|| RegMemError::UnknownCommand(word.to_string()))?;

        let mut args = args.iter().map(AsRef::as_ref);

        let address_text = args.next().ok_or(RegMemError::MissingArgument("address"))?;
        let raw_address = parse_u32(address_text)
            .ok_or_else(|| RegMemError::InvalidAddress(address_text.to_string()))?;

        let value = if command_word.takes_value() {
            let value_text = args.next().ok_or(RegMemError::MissingArgument("value"))?;
            parse_u32(value_text).ok_or_else(|| RegMemError::InvalidValue(value_text.to_string()))?
        } else {
            0
        };

        if let Some(extra) = args.next() {
            return Err(RegMemError::UnexpectedArgument(extra.to_string()));
        }

        let command = match command_word {
            CommandWord::Read(format) => Command::Read(format.unwrap_or(read_format)),
            CommandWord::Write => Command::Write(value),
            CommandWord::SetBits => Command::SetBits(value),
            CommandWord::ClearBits => Command::ClearBits(value),
        };

        Ok(Self { command, raw_address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(word: &str, args: &[&str]) -> RegMemResult<Invocation> {
        Invocation::parse(word, args, ReadFormat::Dec)
    }

    #[test]
    fn aliases_map_to_the_same_command() {
        for word in ["setbits", "sb", "s"] {
            let invocation = parse(word, &["0xd0c", "0x80"]).unwrap();
            assert_eq!(invocation.command, Command::SetBits(0x80));
            assert_eq!(invocation.raw_address, 0xd0c);
        }
        for word in ["clrbits", "cb", "c"] {
            assert_eq!(parse(word, &["0xd0c", "0x80"]).unwrap().command, Command::ClearBits(0x80));
        }
        for word in ["write", "w"] {
            assert_eq!(parse(word, &["0xd28", "174"]).unwrap().command, Command::Write(174));
        }
    }

    #[test]
    fn read_words_select_the_format() {
        assert_eq!(parse("r", &["0xd24"]).unwrap().command, Command::Read(ReadFormat::Dec));
        assert_eq!(parse("h", &["0xd24"]).unwrap().command, Command::Read(ReadFormat::Hex));
        assert_eq!(parse("b", &["0xd24"]).unwrap().command, Command::Read(ReadFormat::Bin));
        assert_eq!(parse("v", &["0xd24"]).unwrap().command, Command::Read(ReadFormat::Verbose));

        let invocation = Invocation::parse("read", &["0xd24"], ReadFormat::Verbose).unwrap();
        assert_eq!(invocation.command, Command::Read(ReadFormat::Verbose));
    }

    #[test]
    fn unknown_word_is_rejected_before_arguments() {
        let err = parse("zz", &["not-a-number"]).unwrap_err();
        assert!(matches!(err, RegMemError::UnknownCommand(word) if word == "zz"));
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        assert!(matches!(parse("r", &[]), Err(RegMemError::MissingArgument("address"))));
        assert!(matches!(parse("w", &["0xd00"]), Err(RegMemError::MissingArgument("value"))));
        assert!(matches!(parse("r", &["-4"]), Err(RegMemError::InvalidAddress(_))));
        assert!(matches!(
            parse("w", &["0xd00", "0x1_0000_0000"]),
            Err(RegMemError::InvalidValue(_))
        ));
        assert!(matches!(
            parse("w", &["0xd00", "1", "w"]),
            Err(RegMemError::UnexpectedArgument(extra)) if extra == "w"
        ));
    }

    #[test]
    fn read_format_accepts_long_names() {
        assert_eq!("decimal".parse::<ReadFormat>().unwrap(), ReadFormat::Dec);
        assert_eq!("binary".parse::<ReadFormat>().unwrap(), ReadFormat::Bin);
        assert!(matches!("octal".parse::<ReadFormat>(), Err(RegMemError::InvalidValue(_))));
    }
}
