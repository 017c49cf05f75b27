//! Subcommand implementations

pub mod disasm;
pub mod fixtures;
pub mod run;

use crate::CliError;

/// Decode a bytecode argument, with or without `0x`
pub fn parse_code(input: &str) -> Result<Vec<u8>, CliError> {
    let input = input.trim();
    let digits = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(digits).map_err(|e| CliError::InvalidHex(format!("{}: {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code("6001").unwrap(), vec![0x60, 0x01]);
        assert_eq!(parse_code(" 0x6001 ").unwrap(), vec![0x60, 0x01]);
        assert!(parse_code("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_code_rejects_bad_hex() {
        assert!(matches!(parse_code("600"), Err(CliError::InvalidHex(_))));
        assert!(matches!(parse_code("zz"), Err(CliError::InvalidHex(_))));
    }
}
