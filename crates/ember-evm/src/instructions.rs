//! Handlers for instructions that touch more than the stack
//!
//! Each handler checks its operands with `top_n` and only pops once nothing
//! else can fail.

use crate::codec::{memory_offset, word_from_be_bytes, word_from_usize, word_to_be_bytes};
use crate::error::EvmResult;
use crate::interpreter::Flow;
use crate::machine::Machine;

pub(crate) fn stop(_m: &mut Machine) -> EvmResult<Flow> {
    Ok(Flow::Stop)
}

pub(crate) fn pop(m: &mut Machine) -> EvmResult<Flow> {
    m.stack.pop()?;
    Ok(Flow::Continue)
}

pub(crate) fn mload(m: &mut Machine) -> EvmResult<Flow> {
    let [offset] = m.stack.top_n::<1>()?;
    let offset = memory_offset(offset)?;
    let value = word_from_be_bytes(m.memory.read(offset, 32)?)?;
    m.stack.drop_n(1)?;
    m.stack.push(value)?;
    Ok(Flow::Continue)
}

pub(crate) fn mstore(m: &mut Machine) -> EvmResult<Flow> {
    store(m, 32)
}

pub(crate) fn mstore8(m: &mut Machine) -> EvmResult<Flow> {
    store(m, 1)
}

fn store(m: &mut Machine, width: usize) -> EvmResult<Flow> {
    let [offset, value] = m.stack.top_n::<2>()?;
    let offset = memory_offset(offset)?;
    m.memory.write(offset, &word_to_be_bytes(value, width), width)?;
    m.stack.drop_n(2)?;
    Ok(Flow::Continue)
}

pub(crate) fn jump(m: &mut Machine) -> EvmResult<Flow> {
    let [dest] = m.stack.top_n::<1>()?;
    let target = m.jump_target(dest)?;
    m.stack.drop_n(1)?;
    Ok(Flow::Jump(target))
}

pub(crate) fn jumpi(m: &mut Machine) -> EvmResult<Flow> {
    let [dest, condition] = m.stack.top_n::<2>()?;
    if condition.is_zero() {
        m.stack.drop_n(2)?;
        return Ok(Flow::Continue);
    }
    let target = m.jump_target(dest)?;
    m.stack.drop_n(2)?;
    Ok(Flow::Jump(target))
}

pub(crate) fn pc(m: &mut Machine) -> EvmResult<Flow> {
    m.stack.push(word_from_usize(m.pc))?;
    Ok(Flow::Continue)
}

pub(crate) fn msize(m: &mut Machine) -> EvmResult<Flow> {
    m.stack.push(word_from_usize(m.memory.size()))?;
    Ok(Flow::Continue)
}

pub(crate) fn jumpdest(_m: &mut Machine) -> EvmResult<Flow> {
    Ok(Flow::Continue)
}

pub(crate) fn return_(m: &mut Machine) -> EvmResult<Flow> {
    halt_with_data(m).map(Flow::Return)
}

pub(crate) fn revert(m: &mut Machine) -> EvmResult<Flow> {
    halt_with_data(m).map(Flow::Revert)
}

fn halt_with_data(m: &mut Machine) -> EvmResult<Vec<u8>> {
    let [offset, size] = m.stack.top_n::<2>()?;
    let offset = memory_offset(offset)?;
    let size = memory_offset(size)?;
    let data = m.memory.read_range(offset, size)?;
    m.stack.drop_n(2)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvmError;
    use crate::memory::DEFAULT_MEMORY_LIMIT;
    use crate::stack::Word;

    fn machine_with(stack: &[u64]) -> Machine {
        let mut m = Machine::new(vec![0x00], DEFAULT_MEMORY_LIMIT);
        for &v in stack {
            m.stack.push(Word::from(v)).unwrap();
        }
        m
    }

    #[test]
    fn test_mstore_then_mload() {
        // value pushed first, offset on top
        let mut m = machine_with(&[0xABCD, 0]);
        assert_eq!(mstore(&mut m).unwrap(), Flow::Continue);
        assert!(m.stack.is_empty());
        assert_eq!(m.memory.size(), 32);

        m.stack.push(Word::zero()).unwrap();
        mload(&mut m).unwrap();
        assert_eq!(m.stack.pop().unwrap(), Word::from(0xABCD));
    }

    #[test]
    fn test_mstore8_writes_low_byte() {
        let mut m = machine_with(&[0x1234, 5]);
        mstore8(&mut m).unwrap();
        assert_eq!(m.memory.data()[5], 0x34);
        assert_eq!(m.memory.size(), 32);
    }

    #[test]
    fn test_store_underflow_is_atomic() {
        let mut m = machine_with(&[7]);
        assert_eq!(mstore(&mut m), Err(EvmError::StackUnderflow));
        assert_eq!(m.stack.len(), 1);
        assert_eq!(m.memory.size(), 0);
    }

    #[test]
    fn test_bad_offset_is_atomic() {
        let mut m = machine_with(&[1]);
        m.stack.push(Word::MAX).unwrap();
        assert_eq!(mstore(&mut m), Err(EvmError::InvalidMemoryOffset));
        assert_eq!(m.stack.len(), 2);
        assert_eq!(mload(&mut m), Err(EvmError::InvalidMemoryOffset));
        assert_eq!(m.stack.len(), 2);
    }

    #[test]
    fn test_jumpi_not_taken_skips_validation() {
        // condition 0, destination 99 (invalid) on top
        let mut m = machine_with(&[0, 99]);
        assert_eq!(jumpi(&mut m).unwrap(), Flow::Continue);
        assert!(m.stack.is_empty());
    }

    #[test]
    fn test_jump_invalid_keeps_stack() {
        let mut m = machine_with(&[0]);
        assert_eq!(jump(&mut m), Err(EvmError::JumpToInvalidDestination(0)));
        assert_eq!(m.stack.len(), 1);
    }

    #[test]
    fn test_return_copies_memory() {
        let mut m = machine_with(&[0xBEEF, 0]);
        mstore(&mut m).unwrap();

        // size 2, offset 30
        m.stack.push(Word::from(2)).unwrap();
        m.stack.push(Word::from(30)).unwrap();
        assert_eq!(return_(&mut m).unwrap(), Flow::Return(vec![0xBE, 0xEF]));
        assert!(m.stack.is_empty());
    }

    #[test]
    fn test_revert_empty_payload() {
        let mut m = machine_with(&[0, 0]);
        assert_eq!(revert(&mut m).unwrap(), Flow::Revert(Vec::new()));
        assert_eq!(m.memory.size(), 0);
    }

    #[test]
    fn test_pc_and_msize() {
        let mut m = machine_with(&[]);
        m.pc = 7;
        pc(&mut m).unwrap();
        msize(&mut m).unwrap();
        assert_eq!(m.stack.to_vec_top_first(), vec![Word::zero(), Word::from(7)]);
    }
}
