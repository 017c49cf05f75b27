//! Interpreter configuration

use crate::memory::DEFAULT_MEMORY_LIMIT;

/// Default number of instructions an execution may run
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

/// Resource guards applied to a single execution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpreterConfig {
    /// Maximum number of executed instructions (`None` = unbounded)
    pub step_limit: Option<u64>,
    /// Maximum memory size in bytes
    pub memory_limit: usize,
}

impl InterpreterConfig {
    /// Config with no step limit
    pub fn unlimited() -> Self {
        Self {
            step_limit: None,
            ..Self::default()
        }
    }

    /// Set the step limit
    pub fn with_step_limit(mut self, limit: Option<u64>) -> Self {
        self.step_limit = limit;
        self
    }

    /// Set the memory limit
    pub fn with_memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = limit;
        self
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            step_limit: Some(DEFAULT_STEP_LIMIT),
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}
