//! Execution environment from fixture fields

use crate::error::{TestError, TestResult};
use crate::types::{decode_hex, Fixture, FixtureBlock, FixtureTx, HexAddress, HexWord};
use ember_evm::{Account, Address, BlockContext, Environment, TxContext, WorldState};
use std::collections::BTreeMap;

/// Build the environment for a fixture; missing sections keep their defaults
pub fn build_environment(fixture: &Fixture) -> TestResult<Environment> {
    let tx = fixture.tx.as_ref().map(build_tx).unwrap_or_default();
    let block = fixture.block.as_ref().map(build_block).unwrap_or_default();
    let state = match &fixture.state {
        Some(accounts) => build_state(accounts)?,
        None => WorldState::new(),
    };
    Ok(Environment::new(tx, block, state))
}

fn address(value: Option<HexAddress>) -> Address {
    value.map(|a| a.0).unwrap_or_default()
}

fn build_tx(tx: &FixtureTx) -> TxContext {
    TxContext {
        to: address(tx.to),
        from: address(tx.from),
        origin: address(tx.origin),
        gas_price: tx.gasprice.unwrap_or_default().0,
        value: tx.value.unwrap_or_default().0,
        data: tx.data.as_ref().map(|d| d.0.clone()).unwrap_or_default(),
    }
}

fn build_block(block: &FixtureBlock) -> BlockContext {
    let defaults = BlockContext::default();
    let or = |value: Option<HexWord>, default| value.map(|v| v.0).unwrap_or(default);
    BlockContext {
        number: or(block.number, defaults.number),
        timestamp: or(block.timestamp, defaults.timestamp),
        gas_limit: or(block.gaslimit, defaults.gas_limit),
        coinbase: block.coinbase.map(|a| a.0).unwrap_or(defaults.coinbase),
        difficulty: or(block.difficulty, defaults.difficulty),
        chain_id: or(block.chainid, defaults.chain_id),
        base_fee: or(block.basefee, defaults.base_fee),
    }
}

fn build_state(accounts: &BTreeMap<String, crate::types::FixtureAccount>) -> TestResult<WorldState> {
    let mut state = WorldState::new();
    for (key, account) in accounts {
        let bytes = decode_hex(key)?;
        if bytes.len() != 20 {
            return Err(TestError::Parse(format!("invalid state address: {}", key)));
        }
        state.insert(
            Address::from_slice(&bytes),
            Account {
                balance: account.balance.unwrap_or_default().0,
                code: account
                    .code
                    .as_ref()
                    .and_then(|c| c.bin.as_ref())
                    .map(|bin| bin.0.clone())
                    .unwrap_or_default(),
            },
        );
    }
    Ok(state)
}
