//! Execute bytecode

use ember_evm::{execute_with_config, Environment, ExecutionResult, InterpreterConfig};
use serde_json::Value;

use crate::{commands::parse_code, output::Output, CliError};

/// Run `code` and print the result; faults and reverts are output, not errors
pub fn execute(code: &str, config: InterpreterConfig, json: bool) -> Result<(), CliError> {
    let code = parse_code(code)?;
    let result = execute_with_config(&code, &Environment::default(), config);

    Output::new(json)
        .field_bool("success", result.success)
        .field("outcome", &result.outcome.to_string())
        .field_value(
            "stack",
            Value::Array(result.stack_hex().into_iter().map(Value::String).collect()),
        )
        .field("return", &result.return_hex())
        .field_u64("steps", result.steps)
        .message(&render(&result))
        .print()
}

fn render(result: &ExecutionResult) -> String {
    let mut lines = vec![
        format!("Success: {}", result.success),
        format!("Outcome: {}", result.outcome),
    ];
    if result.stack.is_empty() {
        lines.push("Stack: (empty)".to_string());
    } else {
        lines.push("Stack (top first):".to_string());
        lines.extend(result.stack_hex().into_iter().map(|w| format!("  {}", w)));
    }
    lines.push(format!("Return: {}", result.return_hex()));
    lines.push(format!("Steps: {}", result.steps));
    lines.join("\n")
}
