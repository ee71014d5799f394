//! Networks the deploy steps know about.

/// Chain IDs of every supported network.
pub mod ids {
    pub const SEPOLIA: u64 = 11155111;
    pub const ARBITRUM: u64 = 42161;
    pub const ARBITRUM_SEPOLIA: u64 = 421614;
    pub const BASE: u64 = 8453;
    pub const BERACHAIN_TESTNET: u64 = 80085;
    pub const SONIC: u64 = 146;
    pub const MONAD_TESTNET: u64 = 10143;
    pub const RISE_TESTNET: u64 = 11155931;
    /// Local hardhat/anvil node.
    pub const HARDHAT: u64 = 31337;
}

/// A network known to the chain registry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Chain {
    Sepolia,
    Arbitrum,
    ArbitrumSepolia,
    Base,
    BerachainTestnet,
    Sonic,
    MonadTestnet,
    RiseTestnet,
    Hardhat,
}

impl Chain {
    pub fn id(&self) -> u64 {
        match self {
            Chain::Sepolia => ids::SEPOLIA,
            Chain::Arbitrum => ids::ARBITRUM,
            Chain::ArbitrumSepolia => ids::ARBITRUM_SEPOLIA,
            Chain::Base => ids::BASE,
            Chain::BerachainTestnet => ids::BERACHAIN_TESTNET,
            Chain::Sonic => ids::SONIC,
            Chain::MonadTestnet => ids::MONAD_TESTNET,
            Chain::RiseTestnet => ids::RISE_TESTNET,
            Chain::Hardhat => ids::HARDHAT,
        }
    }

    /// Look up a chain by ID. Unknown IDs yield `None`.
    pub fn from_id(chain_id: u64) -> Option<Self> {
        <Self as strum::IntoEnumIterator>::iter().find(|chain| chain.id() == chain_id)
    }

    /// Public test networks.
    pub fn is_testnet(&self) -> bool {
        matches!(
            self,
            Chain::Sepolia
                | Chain::ArbitrumSepolia
                | Chain::BerachainTestnet
                | Chain::MonadTestnet
                | Chain::RiseTestnet
        )
    }

    /// Local development nodes.
    pub fn is_development(&self) -> bool {
        matches!(self, Chain::Hardhat)
    }
}
