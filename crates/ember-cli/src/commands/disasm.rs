//! Disassemble bytecode

use ember_evm::disassemble;
use serde_json::json;

use crate::{commands::parse_code, output::Output, CliError};

/// Print one instruction per line
pub fn execute(code: &str, json: bool) -> Result<(), CliError> {
    let code = parse_code(code)?;
    let instructions = disassemble(&code);

    let listing: Vec<_> = instructions
        .iter()
        .map(|i| {
            json!({
                "pc": i.pc,
                "name": i.name,
                "immediate": (!i.immediate.is_empty()).then(|| format!("0x{}", hex::encode(&i.immediate))),
            })
        })
        .collect();

    let text = instructions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    Output::new(json)
        .field_value("instructions", listing.into())
        .message(&text)
        .print()
}
