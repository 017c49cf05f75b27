//! Conversions between big-endian bytes, native integers and words

use crate::error::{EvmError, EvmResult};
use crate::stack::Word;

/// Decode a big-endian byte string into a word.
///
/// Shorter inputs are zero-extended on the left. Longer inputs are accepted
/// only when every byte beyond the low 32 is zero.
pub fn word_from_be_bytes(bytes: &[u8]) -> EvmResult<Word> {
    if bytes.len() > 32 {
        let (excess, low) = bytes.split_at(bytes.len() - 32);
        if excess.iter().any(|&b| b != 0) {
            return Err(EvmError::StackValueTooBig);
        }
        return Ok(Word::from_big_endian(low));
    }
    Ok(Word::from_big_endian(bytes))
}

/// Encode a word as exactly `len` big-endian bytes.
///
/// `len > 32` pads with leading zeros; `len < 32` keeps the low-order bytes.
pub fn word_to_be_bytes(value: Word, len: usize) -> Vec<u8> {
    let mut full = [0u8; 32];
    value.to_big_endian(&mut full);
    if len >= 32 {
        let mut out = vec![0u8; len - 32];
        out.extend_from_slice(&full);
        out
    } else {
        full[32 - len..].to_vec()
    }
}

/// Word as `usize`, if it fits
pub fn word_to_usize(value: Word) -> Option<usize> {
    if value.bits() > 64 {
        return None;
    }
    usize::try_from(value.low_u64()).ok()
}

/// `usize` as a word
pub fn word_from_usize(value: usize) -> Word {
    Word::from(value as u64)
}

/// Word as a memory offset
pub fn memory_offset(value: Word) -> EvmResult<usize> {
    word_to_usize(value).ok_or(EvmError::InvalidMemoryOffset)
}

/// Minimal `0x`-prefixed hex rendering (`0x0` for zero)
pub fn word_to_hex(value: Word) -> String {
    format!("0x{:x}", value)
}
