//! Opcode definitions and the dispatch table

use crate::error::EvmResult;
use crate::instructions;
use crate::interpreter::Flow;
use crate::machine::Machine;
use crate::stack::Word;
use crate::word;

/// Opcodes understood by the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Opcode {
    // Stop and Arithmetic
    STOP = 0x00,
    ADD = 0x01,
    MUL = 0x02,
    SUB = 0x03,
    DIV = 0x04,
    SDIV = 0x05,
    MOD = 0x06,
    SMOD = 0x07,
    ADDMOD = 0x08,
    MULMOD = 0x09,
    EXP = 0x0A,
    SIGNEXTEND = 0x0B,

    // Comparison & Bitwise Logic
    LT = 0x10,
    GT = 0x11,
    SLT = 0x12,
    SGT = 0x13,
    EQ = 0x14,
    ISZERO = 0x15,
    AND = 0x16,
    OR = 0x17,
    XOR = 0x18,
    NOT = 0x19,
    BYTE = 0x1A,
    SHL = 0x1B,
    SHR = 0x1C,
    SAR = 0x1D,

    // Stack, Memory and Flow Operations
    POP = 0x50,
    MLOAD = 0x51,
    MSTORE = 0x52,
    MSTORE8 = 0x53,
    JUMP = 0x56,
    JUMPI = 0x57,
    PC = 0x58,
    MSIZE = 0x59,
    JUMPDEST = 0x5B,

    // Push Operations
    PUSH1 = 0x60,
    PUSH32 = 0x7F,

    // Duplication Operations
    DUP1 = 0x80,
    DUP16 = 0x8F,

    // Exchange Operations
    SWAP1 = 0x90,
    SWAP16 = 0x9F,

    // Halting
    RETURN = 0xF3,
    REVERT = 0xFD,
}

impl Opcode {
    /// Byte value of this opcode
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// `PUSHn` opcode byte (n = 1..=32)
    pub const fn push(n: usize) -> u8 {
        Opcode::PUSH1 as u8 + (n as u8 - 1)
    }

    /// `DUPn` opcode byte (n = 1..=16)
    pub const fn dup(n: usize) -> u8 {
        Opcode::DUP1 as u8 + (n as u8 - 1)
    }

    /// `SWAPn` opcode byte (n = 1..=16)
    pub const fn swap(n: usize) -> u8 {
        Opcode::SWAP1 as u8 + (n as u8 - 1)
    }
}

/// Handler with direct access to the machine state
pub type Handler = fn(&mut Machine) -> EvmResult<Flow>;

/// How an operation executes.
///
/// The word-function variants pop their operands (top of stack first) and push
/// the single result; `Machine` handlers validate and mutate state themselves
/// and are the only operations that may touch memory or set the pc.
#[derive(Clone, Copy)]
pub enum Exec {
    /// f(a) for one operand
    Unary(fn(Word) -> Word),
    /// f(a, b) for two operands
    Binary(fn(Word, Word) -> Word),
    /// f(a, b, c) for three operands
    Ternary(fn(Word, Word, Word) -> Word),
    /// Push an n-byte immediate
    Push(usize),
    /// Duplicate the n-th item
    Dup(usize),
    /// Swap the top with the item n below it
    Swap(usize),
    /// Arbitrary machine handler
    Machine(Handler),
}

/// Dispatch table entry
#[derive(Clone, Copy)]
pub struct Operation {
    /// Mnemonic
    pub name: &'static str,
    /// Stack operands consumed or inspected
    pub inputs: usize,
    /// Execution strategy
    pub exec: Exec,
}

impl Operation {
    const fn new(name: &'static str, inputs: usize, exec: Exec) -> Self {
        Self { name, inputs, exec }
    }

    const fn unary(name: &'static str, f: fn(Word) -> Word) -> Self {
        Self::new(name, 1, Exec::Unary(f))
    }

    const fn binary(name: &'static str, f: fn(Word, Word) -> Word) -> Self {
        Self::new(name, 2, Exec::Binary(f))
    }

    const fn ternary(name: &'static str, f: fn(Word, Word, Word) -> Word) -> Self {
        Self::new(name, 3, Exec::Ternary(f))
    }

    const fn machine(name: &'static str, inputs: usize, handler: Handler) -> Self {
        Self::new(name, inputs, Exec::Machine(handler))
    }

    /// Number of immediate bytes following the opcode
    pub fn immediate_size(&self) -> usize {
        match self.exec {
            Exec::Push(n) => n,
            _ => 0,
        }
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("immediate", &self.immediate_size())
            .finish()
    }
}

const PUSH_NAMES: [&str; 32] = [
    "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8",
    "PUSH9", "PUSH10", "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16",
    "PUSH17", "PUSH18", "PUSH19", "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24",
    "PUSH25", "PUSH26", "PUSH27", "PUSH28", "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];

const DUP_NAMES: [&str; 16] = [
    "DUP1", "DUP2", "DUP3", "DUP4", "DUP5", "DUP6", "DUP7", "DUP8",
    "DUP9", "DUP10", "DUP11", "DUP12", "DUP13", "DUP14", "DUP15", "DUP16",
];

const SWAP_NAMES: [&str; 16] = [
    "SWAP1", "SWAP2", "SWAP3", "SWAP4", "SWAP5", "SWAP6", "SWAP7", "SWAP8",
    "SWAP9", "SWAP10", "SWAP11", "SWAP12", "SWAP13", "SWAP14", "SWAP15", "SWAP16",
];

/// The dispatch table, indexed by opcode byte
pub static OPERATIONS: [Option<Operation>; 256] = build_table();

/// Look up the operation for an opcode byte
pub fn lookup(byte: u8) -> Option<&'static Operation> {
    OPERATIONS[byte as usize].as_ref()
}

const fn build_table() -> [Option<Operation>; 256] {
    const EMPTY: Option<Operation> = None;
    let mut t = [EMPTY; 256];

    t[Opcode::STOP as usize] = Some(Operation::machine("STOP", 0, instructions::stop));
    t[Opcode::ADD as usize] = Some(Operation::binary("ADD", word::add));
    t[Opcode::MUL as usize] = Some(Operation::binary("MUL", word::mul));
    t[Opcode::SUB as usize] = Some(Operation::binary("SUB", word::sub));
    t[Opcode::DIV as usize] = Some(Operation::binary("DIV", word::div));
    t[Opcode::SDIV as usize] = Some(Operation::binary("SDIV", word::sdiv));
    t[Opcode::MOD as usize] = Some(Operation::binary("MOD", word::rem));
    t[Opcode::SMOD as usize] = Some(Operation::binary("SMOD", word::smod));
    t[Opcode::ADDMOD as usize] = Some(Operation::ternary("ADDMOD", word::addmod));
    t[Opcode::MULMOD as usize] = Some(Operation::ternary("MULMOD", word::mulmod));
    t[Opcode::EXP as usize] = Some(Operation::binary("EXP", word::exp));
    t[Opcode::SIGNEXTEND as usize] = Some(Operation::binary("SIGNEXTEND", word::signextend));

    t[Opcode::LT as usize] = Some(Operation::binary("LT", word::lt));
    t[Opcode::GT as usize] = Some(Operation::binary("GT", word::gt));
    t[Opcode::SLT as usize] = Some(Operation::binary("SLT", word::slt));
    t[Opcode::SGT as usize] = Some(Operation::binary("SGT", word::sgt));
    t[Opcode::EQ as usize] = Some(Operation::binary("EQ", word::eq));
    t[Opcode::ISZERO as usize] = Some(Operation::unary("ISZERO", word::iszero));
    t[Opcode::AND as usize] = Some(Operation::binary("AND", word::and));
    t[Opcode::OR as usize] = Some(Operation::binary("OR", word::or));
    t[Opcode::XOR as usize] = Some(Operation::binary("XOR", word::xor));
    t[Opcode::NOT as usize] = Some(Operation::unary("NOT", word::not));
    t[Opcode::BYTE as usize] = Some(Operation::binary("BYTE", word::byte));
    t[Opcode::SHL as usize] = Some(Operation::binary("SHL", word::shl));
    t[Opcode::SHR as usize] = Some(Operation::binary("SHR", word::shr));
    t[Opcode::SAR as usize] = Some(Operation::binary("SAR", word::sar));

    t[Opcode::POP as usize] = Some(Operation::machine("POP", 1, instructions::pop));
    t[Opcode::MLOAD as usize] = Some(Operation::machine("MLOAD", 1, instructions::mload));
    t[Opcode::MSTORE as usize] = Some(Operation::machine("MSTORE", 2, instructions::mstore));
    t[Opcode::MSTORE8 as usize] = Some(Operation::machine("MSTORE8", 2, instructions::mstore8));
    t[Opcode::JUMP as usize] = Some(Operation::machine("JUMP", 1, instructions::jump));
    t[Opcode::JUMPI as usize] = Some(Operation::machine("JUMPI", 2, instructions::jumpi));
    t[Opcode::PC as usize] = Some(Operation::machine("PC", 0, instructions::pc));
    t[Opcode::MSIZE as usize] = Some(Operation::machine("MSIZE", 0, instructions::msize));
    t[Opcode::JUMPDEST as usize] = Some(Operation::machine("JUMPDEST", 0, instructions::jumpdest));

    let mut n = 1;
    while n <= 32 {
        t[Opcode::push(n) as usize] = Some(Operation::new(PUSH_NAMES[n - 1], 0, Exec::Push(n)));
        n += 1;
    }

    let mut n = 1;
    while n <= 16 {
        t[Opcode::dup(n) as usize] = Some(Operation::new(DUP_NAMES[n - 1], n, Exec::Dup(n)));
        t[Opcode::swap(n) as usize] = Some(Operation::new(SWAP_NAMES[n - 1], n + 1, Exec::Swap(n)));
        n += 1;
    }

    t[Opcode::RETURN as usize] = Some(Operation::machine("RETURN", 2, instructions::return_));
    t[Opcode::REVERT as usize] = Some(Operation::machine("REVERT", 2, instructions::revert));

    t
}
