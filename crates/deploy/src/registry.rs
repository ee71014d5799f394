//! Per-chain parameter tables.
//!
//! Each table maps a chain ID to one kind of parameter. Tables are allowed to
//! omit chains; [`ChainTable::require`] turns a missing entry into a
//! [`DeployError::MissingChainConfig`] instead of falling back to a default.

use alloy_core::primitives::{Address, address};

use crate::{
    DeployError,
    chains::ids::{
        ARBITRUM, ARBITRUM_SEPOLIA, BASE, BERACHAIN_TESTNET, MONAD_TESTNET, SEPOLIA, SONIC,
    },
};

/// Immutable mapping from chain ID to a value.
#[derive(Debug)]
pub struct ChainTable<T: 'static> {
    name: &'static str,
    entries: &'static [(u64, T)],
}

impl<T: Copy> ChainTable<T> {
    pub const fn new(name: &'static str, entries: &'static [(u64, T)]) -> Self {
        Self { name, entries }
    }

    /// The table name used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn lookup(&self, chain_id: u64) -> Option<T> {
        self.entries
            .iter()
            .find(|(id, _)| *id == chain_id)
            .map(|(_, value)| *value)
    }

    /// Like [`Self::lookup`] but fails when the chain has no entry.
    pub fn require(&self, chain_id: u64) -> Result<T, DeployError> {
        self.lookup(chain_id)
            .ok_or(DeployError::MissingChainConfig {
                table: self.name,
                chain_id,
            })
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }
}

pub static MINTER_ROUTER: ChainTable<Address> = ChainTable::new(
    "minter router",
    &[
        (SEPOLIA, address!("0x08feDaACe14EB141E51282441b05182519D853D1")),
        (BASE, address!("0x19ceead7105607cd444f5ad10dd51356436095a1")),
        (ARBITRUM_SEPOLIA, address!("0x08feDaACe14EB141E51282441b05182519D853D1")),
        (SONIC, address!("0xaC041Df48dF9791B0654f1Dbbf2CC8450C5f2e9D")),
        (MONAD_TESTNET, address!("0x7792669BEb769c4035bdFcA4F3d794d55922B954")),
    ],
);

pub static BOOK_MANAGER: ChainTable<Address> = ChainTable::new(
    "book manager",
    &[
        (SEPOLIA, address!("0xAA9575d63dFC224b9583fC303dB3188C08d5C85A")),
        (ARBITRUM_SEPOLIA, address!("0xAA9575d63dFC224b9583fC303dB3188C08d5C85A")),
        (BASE, address!("0x382CCccbD3b142D7DA063bF68cd0c89634767F76")),
        (BERACHAIN_TESTNET, address!("0x982c57388101D012846aDC4997E9b073F3bC16BD")),
        (SONIC, address!("0xD4aD5Ed9E1436904624b6dB8B1BE31f36317C636")),
        (MONAD_TESTNET, address!("0xAA9575d63dFC224b9583fC303dB3188C08d5C85A")),
    ],
);

/// Chainlink L2 sequencer uptime feeds. L1-like chains carry the zero address.
pub static CHAINLINK_SEQUENCER_ORACLE: ChainTable<Address> = ChainTable::new(
    "chainlink sequencer oracle",
    &[
        (BASE, address!("0xBCF85224fc0756B9Fa45aA7892530B47e10b6433")),
        (ARBITRUM, address!("0xFdB631F5EE196F0ed6FAa767959853A9F217697D")),
        (ARBITRUM_SEPOLIA, address!("0x8B0f27aDf87E037B53eF1AADB96bE629Be37CeA8")),
        (SONIC, Address::ZERO),
        (MONAD_TESTNET, Address::ZERO),
    ],
);

/// Oracle staleness timeout, in seconds.
pub static ORACLE_TIMEOUT: ChainTable<u64> = ChainTable::new(
    "oracle timeout",
    &[
        (BASE, 24 * 3600),
        (ARBITRUM, 24 * 3600),
        (ARBITRUM_SEPOLIA, 24 * 3600),
        (SONIC, 24 * 3600),
        (MONAD_TESTNET, 24 * 3600),
    ],
);

pub static SAFE_WALLET: ChainTable<Address> = ChainTable::new(
    "safe wallet",
    &[
        (BASE, address!("0xfb976Bae0b3Ef71843F1c6c63da7Df2e44B3836d")),
        (ARBITRUM, address!("0x290D9de8d51fDf4683Aa761865743a28909b2553")),
        (SONIC, address!("0xDE4e00082c6Bd350F197693a5d485121201B0e11")),
    ],
);

/// Grace period after a sequencer restart, in seconds.
pub static SEQUENCER_GRACE_PERIOD: ChainTable<u64> = ChainTable::new(
    "sequencer grace period",
    &[
        (BASE, 3600),
        (ARBITRUM, 3600),
        (ARBITRUM_SEPOLIA, 3600),
        (SONIC, 3600),
        (MONAD_TESTNET, 3600),
    ],
);
