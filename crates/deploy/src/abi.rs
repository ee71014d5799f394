//! Solidity interfaces the steps and tasks call into.

alloy_core::sol! {
    #![sol(all_derives)]

    /// UUPS upgrade entry point (ERC-1822).
    #[sol(all_derives)]
    interface IUUPSUpgradeable {
        function upgradeToAndCall(address newImplementation, bytes data) external payable;
    }

    /// Operator registry.
    #[sol(all_derives)]
    interface IOperator {
        function owner() external view returns (address);
        function isOperator(address operator) external view returns (bool);
        function setOperator(address operator, bool status) external;
    }

    /// Oracle-driven rebalancing strategy.
    #[sol(all_derives)]
    interface ISimpleOracleStrategy {
        #[sol(all_derives)]
        struct Config {
            uint24 referenceThreshold;
            uint24 rebalanceThreshold;
            uint24 rateA;
            uint24 rateB;
            uint24 minRateA;
            uint24 minRateB;
            uint24 priceThresholdA;
            uint24 priceThresholdB;
        }

        function getConfig(bytes32 key) external view returns (Config memory);
        function setConfig(bytes32 key, Config memory config) external;
    }
}

#[cfg(test)]
mod tests {
    use alloy_core::primitives::aliases::U24;

    use super::ISimpleOracleStrategy::Config;

    #[test]
    fn test_config_defaults_to_unset() {
        let config = Config::default();
        assert_eq!(config.rebalanceThreshold, U24::ZERO);
        assert_eq!(config, config.clone());
        assert!(format!("{config:?}").contains("rebalanceThreshold"));
    }
}
