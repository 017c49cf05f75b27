//! # ember-evm
//!
//! Bytecode interpreter for a 256-bit stack machine.
//!
//! This crate provides:
//! - Word arithmetic and byte/word conversions
//! - Operand stack and scratch memory
//! - Static opcode dispatch table
//! - Execution loop and result projection
//! - Disassembler
//!
//! ```
//! use ember_evm::{execute, Environment, Word};
//!
//! // PUSH1 1, PUSH1 1, ADD
//! let result = execute(&[0x60, 0x01, 0x60, 0x01, 0x01], &Environment::default());
//! assert!(result.success);
//! assert_eq!(result.stack, vec![Word::from(2)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod context;
pub mod disasm;
pub mod error;
mod instructions;
pub mod interpreter;
pub mod machine;
pub mod memory;
pub mod opcode;
pub mod stack;
pub mod word;

pub use config::InterpreterConfig;
pub use context::{Account, Address, BlockContext, Environment, TxContext, WorldState};
pub use disasm::{disassemble, Instruction};
pub use error::{EvmError, EvmResult};
pub use interpreter::{
    execute, execute_with_config, ExecutionResult, Flow, Interpreter, Outcome, Status,
};
pub use machine::Machine;
pub use memory::Memory;
pub use opcode::{Opcode, Operation};
pub use stack::{Stack, Word, MAX_STACK_SIZE};
