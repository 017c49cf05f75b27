//! 256-bit word arithmetic
//!
//! Every function is total: results wrap modulo 2^256 and division by zero
//! yields zero. Signed operations read their operands as two's complement and
//! write the result back in the same encoding.

use crate::stack::Word;
use primitive_types::U512;

/// Boolean as a word (1 or 0)
pub fn from_bool(value: bool) -> Word {
    if value {
        Word::one()
    } else {
        Word::zero()
    }
}

/// Wrapping addition
pub fn add(a: Word, b: Word) -> Word {
    a.overflowing_add(b).0
}

/// Wrapping subtraction
pub fn sub(a: Word, b: Word) -> Word {
    a.overflowing_sub(b).0
}

/// Wrapping multiplication
pub fn mul(a: Word, b: Word) -> Word {
    a.overflowing_mul(b).0
}

/// Unsigned division, 0 on division by zero
pub fn div(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    a / b
}

/// Unsigned remainder, 0 on modulo by zero
pub fn rem(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    a % b
}

/// Signed division truncating toward zero
///
/// `-2^255 / -1` does not trap: the magnitude 2^255 is re-encoded as itself.
pub fn sdiv(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    let (a_neg, abs_a) = to_signed(a);
    let (b_neg, abs_b) = to_signed(b);
    from_signed(a_neg != b_neg, abs_a / abs_b)
}

/// Signed remainder, takes the sign of the dividend
pub fn smod(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    let (a_neg, abs_a) = to_signed(a);
    let (_, abs_b) = to_signed(b);
    from_signed(a_neg, abs_a % abs_b)
}

/// (a + b) % n without intermediate overflow
pub fn addmod(a: Word, b: Word, n: Word) -> Word {
    if n.is_zero() {
        return Word::zero();
    }
    narrow((U512::from(a) + U512::from(b)) % U512::from(n))
}

/// (a * b) % n without intermediate overflow
pub fn mulmod(a: Word, b: Word, n: Word) -> Word {
    if n.is_zero() {
        return Word::zero();
    }
    narrow(a.full_mul(b) % U512::from(n))
}

/// base^exponent mod 2^256
pub fn exp(base: Word, exponent: Word) -> Word {
    let mut b = base;
    let mut e = exponent;
    let mut result = Word::one();
    while !e.is_zero() {
        if e.bit(0) {
            result = result.overflowing_mul(b).0;
        }
        b = b.overflowing_mul(b).0;
        e = e >> 1usize;
    }
    result
}

/// Sign-extend `x` from byte `b` (0 = least significant byte)
pub fn signextend(b: Word, x: Word) -> Word {
    if b >= Word::from(31) {
        return x;
    }
    let sign_bit = b.low_u64() as usize * 8 + 7;
    let mask = (Word::one() << (sign_bit + 1)) - Word::one();
    if x.bit(sign_bit) {
        x | !mask
    } else {
        x & mask
    }
}

/// Unsigned less than
pub fn lt(a: Word, b: Word) -> Word {
    from_bool(a < b)
}

/// Unsigned greater than
pub fn gt(a: Word, b: Word) -> Word {
    from_bool(a > b)
}

/// Signed less than
pub fn slt(a: Word, b: Word) -> Word {
    from_bool(signed_lt(a, b))
}

/// Signed greater than
pub fn sgt(a: Word, b: Word) -> Word {
    from_bool(signed_lt(b, a))
}

/// Equality
pub fn eq(a: Word, b: Word) -> Word {
    from_bool(a == b)
}

/// 1 if zero, else 0
pub fn iszero(a: Word) -> Word {
    from_bool(a.is_zero())
}

/// Bitwise AND
pub fn and(a: Word, b: Word) -> Word {
    a & b
}

/// Bitwise OR
pub fn or(a: Word, b: Word) -> Word {
    a | b
}

/// Bitwise XOR
pub fn xor(a: Word, b: Word) -> Word {
    a ^ b
}

/// Bitwise complement
pub fn not(a: Word) -> Word {
    !a
}

/// Byte `n` of `value`, counting from the most significant (0) end
pub fn byte(n: Word, value: Word) -> Word {
    if n >= Word::from(32) {
        return Word::zero();
    }
    Word::from(value.byte(31 - n.low_u64() as usize))
}

/// value << shift
pub fn shl(shift: Word, value: Word) -> Word {
    if shift >= Word::from(256) {
        return Word::zero();
    }
    value << shift.low_u64() as usize
}

/// Logical value >> shift
pub fn shr(shift: Word, value: Word) -> Word {
    if shift >= Word::from(256) {
        return Word::zero();
    }
    value >> shift.low_u64() as usize
}

/// Arithmetic value >> shift (sign-preserving)
pub fn sar(shift: Word, value: Word) -> Word {
    let negative = is_negative(value);
    if shift >= Word::from(256) {
        return if negative { Word::MAX } else { Word::zero() };
    }
    let shift = shift.low_u64() as usize;
    let shifted = value >> shift;
    if negative && shift > 0 {
        shifted | (Word::MAX << (256 - shift))
    } else {
        shifted
    }
}

/// Check if a word is negative in two's complement
pub fn is_negative(v: Word) -> bool {
    v.bit(255)
}

/// Split a word into (negative, magnitude)
pub fn to_signed(v: Word) -> (bool, Word) {
    if is_negative(v) {
        (true, negate(v))
    } else {
        (false, v)
    }
}

/// Re-encode a sign and magnitude as a two's-complement word
pub fn from_signed(negative: bool, magnitude: Word) -> Word {
    if negative {
        negate(magnitude)
    } else {
        magnitude
    }
}

/// Two's complement negation: ~v + 1
fn negate(v: Word) -> Word {
    (!v).overflowing_add(Word::one()).0
}

fn signed_lt(a: Word, b: Word) -> bool {
    match (is_negative(a), is_negative(b)) {
        (true, false) => true,
        (false, true) => false,
        _ => a < b,
    }
}

/// Low 256 bits of a 512-bit value
fn narrow(v: U512) -> Word {
    let mut bytes = [0u8; 64];
    v.to_big_endian(&mut bytes);
    Word::from_big_endian(&bytes[32..])
}
