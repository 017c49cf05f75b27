//! Execution context
//!
//! Transaction, block and world-state data handed to an execution. The
//! current instruction set never reads it.

use crate::stack::Word;
use primitive_types::H160;
use std::collections::BTreeMap;

/// 20-byte account address
pub type Address = H160;

/// Transaction environment information
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxContext {
    /// Recipient address
    pub to: Address,
    /// Sender address
    pub from: Address,
    /// Transaction origin (original sender)
    pub origin: Address,
    /// Gas price
    pub gas_price: Word,
    /// Call value
    pub value: Word,
    /// Call data
    pub data: Vec<u8>,
}

/// Block environment information
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockContext {
    /// Block number
    pub number: Word,
    /// Block timestamp
    pub timestamp: Word,
    /// Block gas limit
    pub gas_limit: Word,
    /// Block coinbase (miner/validator)
    pub coinbase: Address,
    /// Block difficulty/prevrandao
    pub difficulty: Word,
    /// Chain ID
    pub chain_id: Word,
    /// Base fee
    pub base_fee: Word,
}

impl Default for BlockContext {
    fn default() -> Self {
        Self {
            number: Word::zero(),
            timestamp: Word::zero(),
            gas_limit: Word::from(30_000_000u64),
            coinbase: Address::zero(),
            difficulty: Word::zero(),
            chain_id: Word::one(),
            base_fee: Word::zero(),
        }
    }
}

/// Account entry in the world state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    /// Balance
    pub balance: Word,
    /// Deployed code
    pub code: Vec<u8>,
}

/// Accounts keyed by address
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    accounts: BTreeMap<Address, Account>,
}

impl WorldState {
    /// Create an empty world state
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account
    pub fn insert(&mut self, address: Address, account: Account) {
        self.accounts.insert(address, account);
    }

    /// Look up an account
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Check if there are no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Complete execution environment
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Environment {
    /// Transaction context
    pub tx: TxContext,
    /// Block context
    pub block: BlockContext,
    /// World state
    pub state: WorldState,
}

impl Environment {
    /// Create new environment
    pub fn new(tx: TxContext, block: BlockContext, state: WorldState) -> Self {
        Self { tx, block, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_context_default() {
        let block = BlockContext::default();
        assert_eq!(block.gas_limit, Word::from(30_000_000u64));
        assert_eq!(block.chain_id, Word::one());
        assert!(block.coinbase.is_zero());
    }

    #[test]
    fn test_world_state() {
        let mut state = WorldState::new();
        assert!(state.is_empty());

        let address = Address::repeat_byte(0x11);
        state.insert(
            address,
            Account {
                balance: Word::from(100),
                code: vec![0x60, 0x01],
            },
        );

        assert_eq!(state.len(), 1);
        assert_eq!(state.account(&address).unwrap().balance, Word::from(100));
        assert!(state.account(&Address::zero()).is_none());
    }

    #[test]
    fn test_environment_new() {
        let tx = TxContext {
            data: vec![0xAB],
            ..Default::default()
        };
        let env = Environment::new(tx, BlockContext::default(), WorldState::new());
        assert_eq!(env.tx.data, vec![0xAB]);
        assert!(env.state.is_empty());
    }
}
