//! Operand stack

use crate::error::{EvmError, EvmResult};

/// 256-bit unsigned machine word
pub type Word = primitive_types::U256;

/// Maximum number of words on the stack
pub const MAX_STACK_SIZE: usize = 1024;

/// Operand stack (max 1024 words)
///
/// Every operation validates before it mutates, so a failed call leaves the
/// stack exactly as it was.
#[derive(Clone, Debug)]
pub struct Stack {
    data: Vec<Word>,
}

impl Stack {
    /// Create a new empty stack
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(MAX_STACK_SIZE),
        }
    }

    /// Push a value onto the stack
    pub fn push(&mut self, value: Word) -> EvmResult<()> {
        if self.data.len() >= MAX_STACK_SIZE {
            return Err(EvmError::StackOverflow);
        }
        self.data.push(value);
        Ok(())
    }

    /// Pop a value from the stack
    pub fn pop(&mut self) -> EvmResult<Word> {
        self.data.pop().ok_or(EvmError::StackUnderflow)
    }

    /// Pop `N` values; element 0 of the result is the former top.
    pub fn pop_n<const N: usize>(&mut self) -> EvmResult<[Word; N]> {
        let values = self.top_n::<N>()?;
        self.data.truncate(self.data.len() - N);
        Ok(values)
    }

    /// Read the top `N` values without removing them (element 0 is the top)
    pub fn top_n<const N: usize>(&self) -> EvmResult<[Word; N]> {
        if N > self.data.len() {
            return Err(EvmError::StackUnderflow);
        }
        let len = self.data.len();
        Ok(std::array::from_fn(|i| self.data[len - 1 - i]))
    }

    /// Remove the top `n` values
    pub fn drop_n(&mut self, n: usize) -> EvmResult<()> {
        if n > self.data.len() {
            return Err(EvmError::StackUnderflow);
        }
        self.data.truncate(self.data.len() - n);
        Ok(())
    }

    /// Value `depth` positions from the top (1 = top)
    pub fn peek(&self, depth: usize) -> EvmResult<Word> {
        if depth == 0 || depth > self.data.len() {
            return Err(EvmError::StackUnderflow);
        }
        Ok(self.data[self.data.len() - depth])
    }

    /// Swap top with item at depth (1 = swap with second item)
    pub fn swap(&mut self, depth: usize) -> EvmResult<()> {
        if depth == 0 || depth >= self.data.len() {
            return Err(EvmError::StackUnderflow);
        }
        let len = self.data.len();
        self.data.swap(len - 1, len - 1 - depth);
        Ok(())
    }

    /// Duplicate item at depth to top (1 = dup top)
    pub fn dup(&mut self, depth: usize) -> EvmResult<()> {
        let value = self.peek(depth)?;
        self.push(value)
    }

    /// Get current stack size
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Stack contents, top first
    pub fn to_vec_top_first(&self) -> Vec<Word> {
        self.data.iter().rev().copied().collect()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
