//! Bytecode disassembly

use crate::opcode;
use std::fmt;

/// One decoded instruction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Offset of the opcode byte
    pub pc: usize,
    /// Mnemonic, or `INVALID(0x..)` for unassigned bytes
    pub name: String,
    /// Immediate bytes (PUSH only); shorter than the PUSH width when truncated
    pub immediate: Vec<u8>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}: {}", self.pc, self.name)?;
        if !self.immediate.is_empty() {
            write!(f, " 0x{}", hex::encode(&self.immediate))?;
        }
        Ok(())
    }
}

/// Decode `code` into instructions
pub fn disassemble(code: &[u8]) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;

    while pc < code.len() {
        let byte = code[pc];
        let (name, size) = match opcode::lookup(byte) {
            Some(op) => (op.name.to_string(), op.immediate_size()),
            None => (format!("INVALID(0x{:02x})", byte), 0),
        };
        let start = (pc + 1).min(code.len());
        let end = (pc + 1 + size).min(code.len());
        instructions.push(Instruction {
            pc,
            name,
            immediate: code[start..end].to_vec(),
        });
        pc += 1 + size;
    }

    instructions
}
