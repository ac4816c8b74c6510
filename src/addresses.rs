use std::{fmt, io, io::BufRead};

use mmu::LogicalAddress;

#[derive(Debug)]
pub enum AddressListError {
    /// `line` is 1-based.
    Parse { line: usize, text: String },
    Io(io::Error),
}

impl fmt::Display for AddressListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressListError::Parse { line, text } => {
                write!(f, "line {}: {:?} is not a decimal address", line, text)
            }
            AddressListError::Io(e) => write!(f, "failed to read address list: {}", e),
        }
    }
}

impl std::error::Error for AddressListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AddressListError::Parse { .. } => None,
            AddressListError::Io(e) => Some(e),
        }
    }
}

/// Reads one decimal address per line, skipping blank lines.
pub fn read_addresses<R: BufRead>(reader: R) -> Result<Vec<LogicalAddress>, AddressListError> {
    let mut addresses = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(AddressListError::Io)?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let raw = text.parse::<u32>().map_err(|_| AddressListError::Parse {
            line: i + 1,
            text: text.to_string(),
        })?;
        addresses.push(LogicalAddress::new(raw));
    }
    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_one_address_per_line() {
        let input = "16916\n62493\r\n  30198 \n\n53683\n";
        let addresses = read_addresses(input.as_bytes()).unwrap();
        let raw: Vec<u32> = addresses.iter().map(|a| a.raw()).collect();
        assert_eq!(raw, vec![16916, 62493, 30198, 53683]);
    }

    #[test]
    fn empty_input() {
        assert!(read_addresses("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_decimal_line() {
        let err = read_addresses("1\n2\nabc\n4\n".as_bytes()).unwrap_err();
        match err {
            AddressListError::Parse { line, text } => {
                assert_eq!(line, 3);
                assert_eq!(text, "abc");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(read_addresses("-5\n".as_bytes()).is_err());
    }

    #[test]
    fn keeps_values_above_sixteen_bits() {
        let addresses = read_addresses("70000\n".as_bytes()).unwrap();
        assert_eq!(addresses[0].raw(), 70000);
        assert_eq!(addresses[0].decode(), ((70000u32 >> 8) as u8, (70000u32 & 0xFF) as u8));
    }
}
