//! Fixture file format

use crate::error::TestResult;
use ember_evm::codec::word_from_be_bytes;
use ember_evm::{Address, EvmError, Word};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Decode hex with an optional `0x` prefix, padding odd lengths
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.len() % 2 == 1 {
        hex::decode(format!("0{}", s))
    } else {
        hex::decode(s)
    }
}

/// Hex-encoded bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexBytes(pub Vec<u8>);

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        decode_hex(&s).map(HexBytes).map_err(serde::de::Error::custom)
    }
}

/// Hex-encoded word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexWord(pub Word);

impl<'de> Deserialize<'de> for HexWord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let bytes = decode_hex(&s).map_err(serde::de::Error::custom)?;
        word_from_be_bytes(&bytes)
            .map(HexWord)
            .map_err(serde::de::Error::custom)
    }
}

/// Hex-encoded address (20 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct HexAddress(pub Address);

impl<'de> Deserialize<'de> for HexAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let bytes = decode_hex(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != 20 {
            return Err(serde::de::Error::custom(format!(
                "invalid address length: {}",
                bytes.len()
            )));
        }
        Ok(HexAddress(Address::from_slice(&bytes)))
    }
}

/// Fixture file structure (list of cases)
pub type FixtureFile = Vec<Fixture>;

/// Single fixture
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// Case name
    pub name: String,
    /// Free-form hint shown on failure
    #[serde(default)]
    pub hint: Option<String>,
    /// Program
    pub code: FixtureCode,
    /// Transaction context
    #[serde(default)]
    pub tx: Option<FixtureTx>,
    /// Block context
    #[serde(default)]
    pub block: Option<FixtureBlock>,
    /// World state, keyed by address
    #[serde(default)]
    pub state: Option<BTreeMap<String, FixtureAccount>>,
    /// Expected result
    pub expect: FixtureExpect,
}

/// Program in assembly and binary form
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureCode {
    /// Assembly listing (informational)
    #[serde(default)]
    pub asm: Option<String>,
    /// Bytecode; assembly-only entries cannot be executed
    #[serde(default)]
    pub bin: Option<HexBytes>,
}

/// Transaction fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureTx {
    /// Recipient
    pub to: Option<HexAddress>,
    /// Sender
    pub from: Option<HexAddress>,
    /// Origin
    pub origin: Option<HexAddress>,
    /// Gas price
    pub gasprice: Option<HexWord>,
    /// Call value
    pub value: Option<HexWord>,
    /// Call data
    pub data: Option<HexBytes>,
}

/// Block fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureBlock {
    /// Base fee
    pub basefee: Option<HexWord>,
    /// Coinbase
    pub coinbase: Option<HexAddress>,
    /// Timestamp
    pub timestamp: Option<HexWord>,
    /// Block number
    pub number: Option<HexWord>,
    /// Difficulty
    pub difficulty: Option<HexWord>,
    /// Gas limit
    pub gaslimit: Option<HexWord>,
    /// Chain ID
    pub chainid: Option<HexWord>,
}

/// Account in the fixture world state
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureAccount {
    /// Balance
    pub balance: Option<HexWord>,
    /// Code
    pub code: Option<FixtureCode>,
}

/// Expectations; absent fields are not checked
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureExpect {
    /// Final stack, top first, as hex or decimal literals
    pub stack: Option<Vec<String>>,
    /// Success flag
    pub success: Option<bool>,
    /// Return data
    #[serde(rename = "return")]
    pub return_data: Option<HexBytes>,
}

/// Parse a stack literal: `0x` hex or decimal.
///
/// Values above 2^256 - 1 fail with `StackValueTooBig`, negative values with
/// `StackValueTooSmall`.
pub fn parse_word_literal(literal: &str) -> TestResult<Word> {
    let literal = literal.trim();
    if literal.starts_with('-') {
        return Err(EvmError::StackValueTooSmall.into());
    }
    if let Some(digits) = literal.strip_prefix("0x") {
        let bytes = decode_hex(digits)?;
        return Ok(word_from_be_bytes(&bytes)?);
    }
    Word::from_dec_str(literal).map_err(|e| match e {
        uint::FromDecStrErr::InvalidLength => EvmError::StackValueTooBig.into(),
        uint::FromDecStrErr::InvalidCharacter => {
            crate::TestError::Parse(format!("invalid stack literal: {}", literal))
        }
    })
}

/// Parse a top-first list of stack literals
pub fn parse_stack(literals: &[String]) -> TestResult<Vec<Word>> {
    literals.iter().map(|l| parse_word_literal(l)).collect()
}
