//! Execution loop

use crate::codec::word_to_hex;
use crate::config::InterpreterConfig;
use crate::context::Environment;
use crate::error::{EvmError, EvmResult};
use crate::machine::Machine;
use crate::opcode::{self, Exec, Operation};
use crate::stack::Word;
use bytes::Bytes;
use std::fmt;
use tracing::{debug, trace};

/// What a handler asks the loop to do next
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Advance past the instruction and its immediate
    Continue,
    /// Set pc to this (already validated) destination
    Jump(usize),
    /// Halt successfully
    Stop,
    /// Halt successfully with return data
    Return(Vec<u8>),
    /// Halt without success, with revert data
    Revert(Vec<u8>),
}

/// State of the execution loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Still executing
    Running,
    /// Halted by STOP, RETURN or the end of code
    HaltedSuccess,
    /// Halted by REVERT
    HaltedRevert,
    /// Terminated by a fault
    Failed(EvmError),
}

impl Status {
    /// Whether the loop has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// How an execution ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Not finished yet (a partially stepped interpreter)
    Running,
    /// Halted successfully
    Success,
    /// Reverted
    Revert,
    /// Faulted
    Failed(EvmError),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Running => write!(f, "running"),
            Outcome::Success => write!(f, "success"),
            Outcome::Revert => write!(f, "revert"),
            Outcome::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of an execution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether execution succeeded
    pub success: bool,
    /// Terminal state
    pub outcome: Outcome,
    /// Final stack, top first
    pub stack: Vec<Word>,
    /// Return data (or revert data)
    pub return_data: Vec<u8>,
    /// Instructions executed, including a faulting one
    pub steps: u64,
}

impl ExecutionResult {
    /// Final stack as minimal `0x` hex strings, top first
    pub fn stack_hex(&self) -> Vec<String> {
        self.stack.iter().map(|&w| word_to_hex(w)).collect()
    }

    /// Return data as a `0x` hex string
    pub fn return_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.return_data))
    }
}

/// Interpreter
pub struct Interpreter {
    machine: Machine,
    config: InterpreterConfig,
    status: Status,
    steps: u64,
    return_data: Vec<u8>,
}

impl Interpreter {
    /// Create new interpreter
    pub fn new(code: impl Into<Bytes>, config: InterpreterConfig) -> Self {
        Self {
            machine: Machine::new(code, config.memory_limit),
            config,
            status: Status::Running,
            steps: 0,
            return_data: Vec::new(),
        }
    }

    /// Execute until a terminal state is reached
    pub fn run(&mut self, _env: &Environment) -> ExecutionResult {
        debug!(code_len = self.machine.code.len(), "execution started");

        while !self.status.is_terminal() {
            self.step();
        }

        let result = self.result();
        match &result.outcome {
            Outcome::Failed(err) => {
                debug!(pc = self.machine.pc, steps = self.steps, error = %err, "execution faulted")
            }
            outcome => debug!(steps = self.steps, %outcome, "execution finished"),
        }
        result
    }

    /// Execute a single instruction, returning the new status
    pub fn step(&mut self) -> &Status {
        if self.status.is_terminal() {
            return &self.status;
        }

        let Some(byte) = self.machine.current_opcode() else {
            self.status = Status::HaltedSuccess;
            return &self.status;
        };

        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                self.status = Status::Failed(EvmError::StepLimitExceeded(limit));
                return &self.status;
            }
        }
        self.steps += 1;

        let Some(op) = opcode::lookup(byte) else {
            self.status = Status::Failed(EvmError::InvalidOpcode(byte));
            return &self.status;
        };

        trace!(
            pc = self.machine.pc,
            op = op.name,
            depth = self.machine.stack.len(),
            "step"
        );

        match self.execute(op) {
            Ok(Flow::Continue) => self.machine.pc += 1 + op.immediate_size(),
            Ok(Flow::Jump(target)) => self.machine.pc = target,
            Ok(Flow::Stop) => self.status = Status::HaltedSuccess,
            Ok(Flow::Return(data)) => {
                self.return_data = data;
                self.status = Status::HaltedSuccess;
            }
            Ok(Flow::Revert(data)) => {
                self.return_data = data;
                self.status = Status::HaltedRevert;
            }
            Err(err) => self.status = Status::Failed(err),
        }
        &self.status
    }

    fn execute(&mut self, op: &Operation) -> EvmResult<Flow> {
        let m = &mut self.machine;
        match op.exec {
            Exec::Unary(f) => {
                let [a] = m.stack.pop_n::<1>()?;
                m.stack.push(f(a))?;
            }
            Exec::Binary(f) => {
                let [a, b] = m.stack.pop_n::<2>()?;
                m.stack.push(f(a, b))?;
            }
            Exec::Ternary(f) => {
                let [a, b, c] = m.stack.pop_n::<3>()?;
                m.stack.push(f(a, b, c))?;
            }
            Exec::Push(size) => {
                let value = m.immediate(size)?;
                m.stack.push(value)?;
            }
            Exec::Dup(depth) => m.stack.dup(depth)?,
            Exec::Swap(depth) => m.stack.swap(depth)?,
            Exec::Machine(handler) => return handler(m),
        }
        Ok(Flow::Continue)
    }

    /// Current status
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Machine state
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Instructions executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Return data
    pub fn return_data(&self) -> &[u8] {
        &self.return_data
    }

    /// Project the current state into a result
    pub fn result(&self) -> ExecutionResult {
        let outcome = match &self.status {
            Status::Running => Outcome::Running,
            Status::HaltedSuccess => Outcome::Success,
            Status::HaltedRevert => Outcome::Revert,
            Status::Failed(err) => Outcome::Failed(err.clone()),
        };
        ExecutionResult {
            success: outcome == Outcome::Success,
            outcome,
            stack: self.machine.stack.to_vec_top_first(),
            return_data: self.return_data.clone(),
            steps: self.steps,
        }
    }
}

/// Execute `code` with the default configuration
pub fn execute(code: &[u8], env: &Environment) -> ExecutionResult {
    execute_with_config(code, env, InterpreterConfig::default())
}

/// Execute `code` in a fresh interpreter
pub fn execute_with_config(
    code: &[u8],
    env: &Environment,
    config: InterpreterConfig,
) -> ExecutionResult {
    Interpreter::new(Bytes::copy_from_slice(code), config).run(env)
}
