//! End-to-end execution through the public API

use ember_evm::{
    disassemble, execute, execute_with_config, Environment, EvmError, Interpreter,
    InterpreterConfig, Outcome, Status, TxContext, Word,
};

fn run(code: &[u8]) -> ember_evm::ExecutionResult {
    execute(code, &Environment::default())
}

/// Counts 5 down to 0:
/// PUSH1 5, JUMPDEST, PUSH1 1, SWAP1, SUB, DUP1, PUSH1 2, JUMPI
const COUNTDOWN: [u8; 11] = [
    0x60, 0x05, 0x5B, 0x60, 0x01, 0x90, 0x03, 0x80, 0x60, 0x02, 0x57,
];

#[test]
fn push_push_add() {
    let result = run(&[0x60, 0x01, 0x60, 0x01, 0x01]);
    assert!(result.success);
    assert_eq!(result.stack, vec![Word::from(2)]);
}

#[test]
fn div_takes_top_as_dividend() {
    let result = run(&[0x60, 0x0A, 0x60, 0x02, 0x04]);
    assert!(result.success);
    assert_eq!(result.stack, vec![Word::zero()]);
}

#[test]
fn push_without_operand() {
    let result = run(&[0x60]);
    assert!(!result.success);
    assert!(matches!(
        result.outcome,
        Outcome::Failed(EvmError::PcOutOfBounds(_))
    ));
}

#[test]
fn pc_reports_instruction_offset() {
    let result = run(&[0x58]);
    assert!(result.success);
    assert_eq!(result.stack, vec![Word::zero()]);
}

#[test]
fn countdown_loop() {
    let result = run(&COUNTDOWN);
    assert!(result.success);
    assert_eq!(result.stack, vec![Word::zero()]);
    // PUSH1 plus five passes over seven instructions
    assert_eq!(result.steps, 36);
}

#[test]
fn countdown_hits_step_limit() {
    let config = InterpreterConfig::default().with_step_limit(Some(20));
    let result = execute_with_config(&COUNTDOWN, &Environment::default(), config);
    assert!(!result.success);
    assert_eq!(result.outcome, Outcome::Failed(EvmError::StepLimitExceeded(20)));
}

#[test]
fn unlimited_config_runs_to_completion() {
    let result = execute_with_config(&COUNTDOWN, &Environment::default(), InterpreterConfig::unlimited());
    assert!(result.success);
}

#[test]
fn context_does_not_affect_execution() {
    let env = Environment {
        tx: TxContext {
            value: Word::from(1000),
            data: vec![0xDE, 0xAD],
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(execute(&COUNTDOWN, &env), run(&COUNTDOWN));
}

#[test]
fn fresh_state_per_execution() {
    // PUSH1 1, PUSH1 0, MSTORE, MSIZE
    let code = [0x60, 0x01, 0x60, 0x00, 0x52, 0x59];
    let first = run(&code);
    let second = run(&code);
    assert_eq!(first.stack, vec![Word::from(32)]);
    assert_eq!(first, second);
}

#[test]
fn return_word_from_memory() {
    // PUSH2 0x0102, PUSH1 0, MSTORE, PUSH1 2, PUSH1 30, RETURN
    let code = [0x61, 0x01, 0x02, 0x60, 0x00, 0x52, 0x60, 0x02, 0x60, 0x1E, 0xF3];
    let result = run(&code);
    assert!(result.success);
    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.return_data, vec![0x01, 0x02]);
    assert!(result.stack.is_empty());
}

#[test]
fn revert_is_not_a_fault() {
    let result = run(&[0x60, 0x00, 0x60, 0x00, 0xFD, 0x60, 0x01]);
    assert!(!result.success);
    assert_eq!(result.outcome, Outcome::Revert);
    assert!(result.stack.is_empty());
}

#[test]
fn interpreter_step_by_step() {
    let mut interp = Interpreter::new(COUNTDOWN.to_vec(), InterpreterConfig::default());
    while !interp.step().is_terminal() {
        assert!(interp.machine().stack().len() <= 3);
    }
    assert_eq!(interp.status(), &Status::HaltedSuccess);
    assert_eq!(interp.result().stack, vec![Word::zero()]);
}

#[test]
fn disassemble_countdown() {
    let listing: Vec<String> = disassemble(&COUNTDOWN).iter().map(ToString::to_string).collect();
    assert_eq!(
        listing,
        vec![
            "0000: PUSH1 0x05",
            "0002: JUMPDEST",
            "0003: PUSH1 0x01",
            "0005: SWAP1",
            "0006: SUB",
            "0007: DUP1",
            "0008: PUSH1 0x02",
            "000a: JUMPI",
        ]
    );
}
