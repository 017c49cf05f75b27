//! Interpreter error types

use crate::stack::Word;
use thiserror::Error;

/// Faults that terminate an execution.
///
/// Halting instructions (`STOP`, `RETURN`, `REVERT`) are not errors; they are
/// reported by handlers as [`Flow`](crate::interpreter::Flow) values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvmError {
    /// Stack overflow
    #[error("stack overflow (max 1024)")]
    StackOverflow,

    /// Stack underflow
    #[error("stack underflow")]
    StackUnderflow,

    /// Value does not fit in a 256-bit word
    #[error("stack value too big")]
    StackValueTooBig,

    /// Negative value where an unsigned word is required
    #[error("stack value too small")]
    StackValueTooSmall,

    /// Invalid opcode
    #[error("invalid opcode: 0x{0:02x}")]
    InvalidOpcode(u8),

    /// Instruction immediate runs past the end of the code
    #[error("pc out of bounds: {0}")]
    PcOutOfBounds(usize),

    /// Jump destination beyond the end of the code
    #[error("jump out of bounds: {0}")]
    JumpOutOfBounds(Word),

    /// Jump destination is not a JUMPDEST
    #[error("jump to invalid destination: {0}")]
    JumpToInvalidDestination(usize),

    /// Memory offset not addressable
    #[error("invalid memory offset")]
    InvalidMemoryOffset,

    /// Unsupported memory access width
    #[error("invalid memory value size: {0}")]
    InvalidMemoryValueSize(usize),

    /// Step limit reached before the program halted
    #[error("step limit exceeded (limit: {0})")]
    StepLimitExceeded(u64),
}

/// Result type for interpreter operations
pub type EvmResult<T> = Result<T, EvmError>;
