//! Machine state: code, program counter, stack and memory

use crate::codec::{word_from_be_bytes, word_to_usize};
use crate::error::{EvmError, EvmResult};
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::stack::{Stack, Word};
use bytes::Bytes;

/// State of one execution.
///
/// Built fresh for every run and owned by its interpreter.
#[derive(Clone, Debug)]
pub struct Machine {
    pub(crate) code: Bytes,
    pub(crate) pc: usize,
    pub(crate) stack: Stack,
    pub(crate) memory: Memory,
}

impl Machine {
    /// Create a machine over `code` whose memory may grow to `memory_limit`
    pub fn new(code: impl Into<Bytes>, memory_limit: usize) -> Self {
        Self {
            code: code.into(),
            pc: 0,
            stack: Stack::new(),
            memory: Memory::with_limit(memory_limit),
        }
    }

    /// Program being executed
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Current program counter
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Operand stack
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Scratch memory
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Opcode byte at the current pc, `None` past the end of code
    pub fn current_opcode(&self) -> Option<u8> {
        self.code.get(self.pc).copied()
    }

    /// Decode the `size`-byte immediate that follows the current opcode
    pub fn immediate(&self, size: usize) -> EvmResult<Word> {
        let end = self.pc + size;
        if end >= self.code.len() {
            return Err(EvmError::PcOutOfBounds(end));
        }
        word_from_be_bytes(&self.code[self.pc + 1..=end])
    }

    /// Validate a jump destination and return it as a code offset
    pub fn jump_target(&self, dest: Word) -> EvmResult<usize> {
        let target = match word_to_usize(dest) {
            Some(target) if target <= self.code.len() => target,
            _ => return Err(EvmError::JumpOutOfBounds(dest)),
        };
        if self.code.get(target) != Some(&Opcode::JUMPDEST.byte()) {
            return Err(EvmError::JumpToInvalidDestination(target));
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::DEFAULT_MEMORY_LIMIT;

    fn machine(code: &[u8]) -> Machine {
        Machine::new(code.to_vec(), DEFAULT_MEMORY_LIMIT)
    }

    #[test]
    fn test_new_machine() {
        let m = machine(&[0x58]);
        assert_eq!(m.pc(), 0);
        assert!(m.stack().is_empty());
        assert_eq!(m.memory().size(), 0);
        assert_eq!(m.current_opcode(), Some(0x58));
        assert_eq!(machine(&[]).current_opcode(), None);
    }

    #[test]
    fn test_immediate() {
        let m = machine(&[0x61, 0x12, 0x34]);
        assert_eq!(m.immediate(2).unwrap(), Word::from(0x1234));
        assert_eq!(m.immediate(3), Err(EvmError::PcOutOfBounds(3)));
    }

    #[test]
    fn test_immediate_truncated() {
        assert_eq!(machine(&[0x60]).immediate(1), Err(EvmError::PcOutOfBounds(1)));
    }

    #[test]
    fn test_jump_target() {
        // PUSH1 3, JUMP, JUMPDEST
        let m = machine(&[0x60, 0x03, 0x56, 0x5B]);
        assert_eq!(m.jump_target(Word::from(3)).unwrap(), 3);
        assert_eq!(
            m.jump_target(Word::from(1)),
            Err(EvmError::JumpToInvalidDestination(1))
        );
        // One past the end is in bounds but holds no JUMPDEST
        assert_eq!(
            m.jump_target(Word::from(4)),
            Err(EvmError::JumpToInvalidDestination(4))
        );
        assert_eq!(
            m.jump_target(Word::from(5)),
            Err(EvmError::JumpOutOfBounds(Word::from(5)))
        );
        assert_eq!(
            m.jump_target(Word::MAX),
            Err(EvmError::JumpOutOfBounds(Word::MAX))
        );
    }
}
