//! Parsing of `fcd exec` operation scripts.
//!
//! Each argument is one operation:
//!
//! | Syntax                         | Meaning                               |
//! |--------------------------------|---------------------------------------|
//! | `write:<text>`                 | write the UTF-8 bytes of `<text>`     |
//! | `fill:<byte>:<count>`          | write `<count>` copies of `<byte>`    |
//! | `read:<count>`                 | read up to `<count>` bytes            |
//! | `seek:<set\|cur\|end>:<offset>`| seek by a signed offset               |
//!
//! Numbers accept decimal or `0x` hex.

use std::fmt;
use std::str::FromStr;

use fcd_core::SeekMode;

/// One scripted operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op
{
    Write(Vec<u8>),
    /// `count` copies of a byte; only materialised up to the buffer's capacity
    Fill(u8, usize),
    Read(usize),
    Seek(SeekMode, i64),
}

impl fmt::Display for Op
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Op::Write(bytes) => write!(f, "write {} bytes", bytes.len()),
            Op::Fill(byte, count) => write!(f, "fill {count} x 0x{byte:02x}"),
            Op::Read(count) => write!(f, "read {count} bytes"),
            Op::Seek(mode, offset) => write!(f, "seek {offset} {mode:?}"),
        }
    }
}

/// Script parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid operation {op:?}: {reason}")]
pub struct ParseOpError
{
    op: String,
    reason: String,
}

impl ParseOpError
{
    fn new(op: &str, reason: impl Into<String>) -> Self
    {
        Self {
            op: op.to_string(),
            reason: reason.into(),
        }
    }
}

impl FromStr for Op
{
    type Err = ParseOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        let (verb, rest) = s
            .split_once(':')
            .ok_or_else(|| ParseOpError::new(s, "expected <verb>:<argument>"))?;

        match verb {
            "write" => Ok(Op::Write(rest.as_bytes().to_vec())),
            "fill" => {
                let (byte, count) = rest
                    .split_once(':')
                    .ok_or_else(|| ParseOpError::new(s, "expected fill:<byte>:<count>"))?;
                let byte = parse_number(byte).ok_or_else(|| ParseOpError::new(s, "bad byte value"))?;
                let byte = u8::try_from(byte).map_err(|_| ParseOpError::new(s, "byte value exceeds 0xff"))?;
                let count = parse_count(count).ok_or_else(|| ParseOpError::new(s, "bad count"))?;
                Ok(Op::Fill(byte, count))
            }
            "read" => {
                let count = parse_count(rest).ok_or_else(|| ParseOpError::new(s, "bad count"))?;
                Ok(Op::Read(count))
            }
            "seek" => {
                let (mode, offset) = rest
                    .split_once(':')
                    .ok_or_else(|| ParseOpError::new(s, "expected seek:<set|cur|end>:<offset>"))?;
                let mode = match mode {
                    "set" | "start" => SeekMode::FromStart,
                    "cur" | "current" => SeekMode::FromCurrent,
                    "end" => SeekMode::FromEnd,
                    _ => return Err(ParseOpError::new(s, "seek mode must be set, cur or end")),
                };
                let offset = parse_number(offset).ok_or_else(|| ParseOpError::new(s, "bad offset"))?;
                Ok(Op::Seek(mode, offset))
            }
            _ => Err(ParseOpError::new(s, "unknown verb (use write, fill, read or seek)")),
        }
    }
}

/// Parse a whole script, failing on the first bad operation
pub fn parse_script<S: AsRef<str>>(ops: &[S]) -> Result<Vec<Op>, ParseOpError>
{
    ops.iter().map(|op| op.as_ref().parse()).collect()
}

fn parse_number(s: &str) -> Option<i64>
{
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_count(s: &str) -> Option<usize>
{
    parse_number(s).and_then(|n| usize::try_from(n).ok())
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_parse_write()
    {
        assert_eq!("write:hello".parse::<Op>().unwrap(), Op::Write(b"hello".to_vec()));
        assert_eq!("write:a:b".parse::<Op>().unwrap(), Op::Write(b"a:b".to_vec()));
    }

    #[test]
    fn test_parse_fill()
    {
        assert_eq!("fill:0xAA:600".parse::<Op>().unwrap(), Op::Fill(0xAA, 600));
        assert_eq!("fill:7:2".parse::<Op>().unwrap(), Op::Fill(7, 2));
        assert_eq!(
            "fill:1:99999999999999".parse::<Op>().unwrap(),
            Op::Fill(1, 99_999_999_999_999)
        );
        assert!("fill:0x100:2".parse::<Op>().is_err());
        assert!("fill:1".parse::<Op>().is_err());
    }

    #[test]
    fn test_parse_read_and_seek()
    {
        assert_eq!("read:1000".parse::<Op>().unwrap(), Op::Read(1000));
        assert_eq!("seek:end:-10".parse::<Op>().unwrap(), Op::Seek(SeekMode::FromEnd, -10));
        assert_eq!("seek:set:0x20".parse::<Op>().unwrap(), Op::Seek(SeekMode::FromStart, 32));
        assert_eq!("seek:cur:+4".parse::<Op>().unwrap(), Op::Seek(SeekMode::FromCurrent, 4));
        assert!("read:-1".parse::<Op>().is_err());
        assert!("seek:middle:0".parse::<Op>().is_err());
    }

    #[test]
    fn test_parse_script_stops_on_error()
    {
        let err = parse_script(&["read:1", "bogus", "read:2"]).unwrap_err();
        assert!(err.to_string().contains("bogus"));
        assert_eq!(parse_script(&["read:1", "seek:set:0"]).unwrap().len(), 2);
    }
}
