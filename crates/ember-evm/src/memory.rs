//! Scratch memory (byte-addressable, expandable)

use crate::error::{EvmError, EvmResult};

/// Access widths supported by word-level reads and writes
pub const SUPPORTED_WIDTHS: [usize; 2] = [1, 32];

/// Default upper bound on memory size (32 MiB)
pub const DEFAULT_MEMORY_LIMIT: usize = 32 * 1024 * 1024;

/// Scratch memory.
///
/// Grows in 32-byte words, zero-filled, and never shrinks.
#[derive(Clone, Debug)]
pub struct Memory {
    data: Vec<u8>,
    limit: usize,
}

impl Memory {
    /// Create new empty memory with the default size limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MEMORY_LIMIT)
    }

    /// Create new empty memory that may grow to at most `limit` bytes.
    ///
    /// Growth is word-aligned, so the usable size is `limit` rounded down to a
    /// multiple of 32.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
        }
    }

    /// Get current memory size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Get raw data slice
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read `length` bytes (1 or 32) at `offset`, growing memory to cover them
    pub fn read(&mut self, offset: usize, length: usize) -> EvmResult<&[u8]> {
        check_width(length)?;
        self.expand(offset, length)?;
        Ok(&self.data[offset..offset + length])
    }

    /// Write `bytes` fitted to `length` (1 or 32) bytes at `offset`.
    ///
    /// Short input is left-padded with zeros; long input keeps its trailing
    /// (least significant) bytes.
    pub fn write(&mut self, offset: usize, bytes: &[u8], length: usize) -> EvmResult<()> {
        check_width(length)?;
        self.expand(offset, length)?;
        let dest = &mut self.data[offset..offset + length];
        if bytes.len() >= length {
            dest.copy_from_slice(&bytes[bytes.len() - length..]);
        } else {
            let pad = length - bytes.len();
            dest[..pad].fill(0);
            dest[pad..].copy_from_slice(bytes);
        }
        Ok(())
    }

    /// Copy out an arbitrary range; a zero-sized range never grows memory
    pub fn read_range(&mut self, offset: usize, size: usize) -> EvmResult<Vec<u8>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        self.expand(offset, size)?;
        Ok(self.data[offset..offset + size].to_vec())
    }

    /// Ensure `[offset, offset + size)` is allocated, rounding up to a word
    fn expand(&mut self, offset: usize, size: usize) -> EvmResult<()> {
        let end = offset
            .checked_add(size)
            .ok_or(EvmError::InvalidMemoryOffset)?;
        if end <= self.data.len() {
            return Ok(());
        }
        let aligned = end
            .div_ceil(32)
            .checked_mul(32)
            .ok_or(EvmError::InvalidMemoryOffset)?;
        if aligned > self.limit {
            return Err(EvmError::InvalidMemoryOffset);
        }
        self.data
            .try_reserve_exact(aligned - self.data.len())
            .map_err(|_| EvmError::InvalidMemoryOffset)?;
        self.data.resize(aligned, 0);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

fn check_width(length: usize) -> EvmResult<()> {
    if SUPPORTED_WIDTHS.contains(&length) {
        Ok(())
    } else {
        Err(EvmError::InvalidMemoryValueSize(length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_default() {
        let mem: Memory = Default::default();
        assert_eq!(mem.size(), 0);
        assert!(mem.data().is_empty());
    }

    #[test]
    fn test_memory_write_read_word() {
        let mut mem = Memory::new();
        let mut value = [0u8; 32];
        value[31] = 0x42;

        mem.write(0, &value, 32).unwrap();
        assert_eq!(mem.read(0, 32).unwrap(), &value);
        assert_eq!(mem.size(), 32);
    }

    #[test]
    fn test_memory_read_grows() {
        let mut mem = Memory::new();
        let bytes = mem.read(0, 32).unwrap();
        assert_eq!(bytes, &[0u8; 32]);
        assert_eq!(mem.size(), 32);

        // Unaligned read spanning two words
        mem.read(33, 32).unwrap();
        assert_eq!(mem.size(), 96);
    }

    #[test]
    fn test_memory_word_alignment() {
        let mut mem = Memory::new();

        mem.write(0, &[1], 1).unwrap();
        assert_eq!(mem.size(), 32);

        mem.write(32, &[1], 1).unwrap();
        assert_eq!(mem.size(), 64);

        mem.write(63, &[1], 1).unwrap();
        assert_eq!(mem.size(), 64);
    }

    #[test]
    fn test_memory_no_shrink() {
        let mut mem = Memory::new();
        mem.write(100, &[1], 1).unwrap();
        let original_size = mem.size();

        mem.read(0, 1).unwrap();
        assert_eq!(mem.size(), original_size);
    }

    #[test]
    fn test_memory_write_pads_short_input() {
        let mut mem = Memory::new();
        mem.write(0, &[0xFF; 32], 32).unwrap();
        mem.write(0, &[0xAB, 0xCD], 32).unwrap();

        let word = mem.read(0, 32).unwrap();
        assert!(word[..30].iter().all(|&b| b == 0));
        assert_eq!(&word[30..], &[0xAB, 0xCD]);
    }

    #[test]
    fn test_memory_write_truncates_long_input() {
        let mut mem = Memory::new();
        mem.write(0, &[0x11, 0x22, 0x33], 1).unwrap();
        assert_eq!(mem.data()[0], 0x33);
        assert!(mem.data()[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_memory_unsupported_width() {
        let mut mem = Memory::new();
        assert_eq!(mem.read(0, 2), Err(EvmError::InvalidMemoryValueSize(2)));
        assert_eq!(mem.write(0, &[1], 16), Err(EvmError::InvalidMemoryValueSize(16)));
        assert_eq!(mem.size(), 0);
    }

    #[test]
    fn test_memory_offset_overflow() {
        let mut mem = Memory::new();
        assert_eq!(mem.read(usize::MAX, 32), Err(EvmError::InvalidMemoryOffset));
        assert_eq!(mem.size(), 0);
    }

    #[test]
    fn test_memory_limit() {
        let mut mem = Memory::with_limit(64);
        mem.write(32, &[1], 32).unwrap();
        assert_eq!(mem.write(33, &[1], 32), Err(EvmError::InvalidMemoryOffset));
        assert_eq!(mem.size(), 64);
    }

    #[test]
    fn test_memory_limit_counts_aligned_size() {
        let mut mem = Memory::with_limit(40);
        mem.write(0, &[1], 32).unwrap();
        // end 33 rounds up to 64, past the limit
        assert_eq!(mem.write(1, &[1], 32), Err(EvmError::InvalidMemoryOffset));
        assert_eq!(mem.size(), 32);
    }

    #[test]
    fn test_memory_alignment_overflow() {
        let mut mem = Memory::with_limit(usize::MAX);
        assert_eq!(mem.read(usize::MAX - 40, 32), Err(EvmError::InvalidMemoryOffset));
        assert_eq!(mem.write(usize::MAX - 40, &[1], 1), Err(EvmError::InvalidMemoryOffset));
        assert_eq!(mem.size(), 0);
    }

    #[test]
    fn test_memory_unallocatable_size() {
        let mut mem = Memory::with_limit(usize::MAX);
        assert_eq!(mem.read(1 << (usize::BITS - 1), 32), Err(EvmError::InvalidMemoryOffset));
        assert_eq!(mem.size(), 0);
    }

    #[test]
    fn test_memory_read_range() {
        let mut mem = Memory::new();
        mem.write(0, &[0xDE, 0xAD, 0xBE, 0xEF], 32).unwrap();

        assert_eq!(mem.read_range(28, 4).unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(mem.read_range(60, 8).unwrap(), vec![0; 8]);
        assert_eq!(mem.size(), 96);
    }

    #[test]
    fn test_memory_read_range_empty() {
        let mut mem = Memory::new();
        assert!(mem.read_range(1_000_000, 0).unwrap().is_empty());
        assert_eq!(mem.size(), 0);
    }
}
