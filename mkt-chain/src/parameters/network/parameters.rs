//! Difficulty-related consensus parameters, and a builder for configured
//! test networks.

use thiserror::Error;

use crate::{
    block::Height,
    parameters::{
        constants::{mainnet, regtest, testnet, PREMINE_DIFFICULTY_SHIFT, PREMINE_END_HEIGHT},
        Network,
    },
    work::difficulty::{CompactDifficulty, ExpandedDifficulty},
};

/// An error building or selecting [`NetworkParameters`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum ParametersError {
    #[error("proof-of-work checks can't be skipped on public network {0}")]
    SkipPowCheckOnPublicNetwork(Network),

    #[error("target spacing must be positive, got {0} seconds")]
    ZeroTargetSpacing(i64),

    #[error(
        "target timespan {target_timespan} must be at least one target spacing {target_spacing}"
    )]
    InvalidAdjustmentInterval {
        target_timespan: i64,
        target_spacing: i64,
    },

    #[error("proof-of-work limit must be non-zero")]
    InvalidPowLimit,

    #[error("network parameters for {selected} are already selected, can't select {requested}")]
    NetworkAlreadySelected {
        selected: Network,
        requested: Network,
    },
}

/// The consensus parameters used by difficulty adjustment and proof-of-work
/// validation.
///
/// These values never change after they are built. Tests that need different
/// values build a new instance with [`ParametersBuilder`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetworkParameters {
    /// The network these parameters were built for.
    network: Network,

    /// The legacy retarget timespan, in seconds.
    target_timespan: i64,

    /// The legacy target block spacing, in seconds.
    target_spacing: i64,

    /// The easiest difficulty threshold allowed.
    pow_limit: ExpandedDifficulty,

    /// The last block mined with proof-of-work rewards.
    last_pow_block_height: Height,

    /// The first height that uses the LWMA difficulty adjustment.
    lwma_activation_height: Height,

    /// The last height of the premine period.
    premine_end_height: Height,

    /// Keep the previous difficulty threshold for every block.
    pow_no_retargeting: bool,

    /// Accept any hash, regardless of its difficulty threshold.
    skip_pow_check: bool,

    /// The genesis block difficulty threshold.
    genesis_difficulty_threshold: CompactDifficulty,
}

impl NetworkParameters {
    /// Returns the default parameters for `network`.
    pub fn new(network: Network) -> NetworkParameters {
        match network {
            Network::Mainnet => NetworkParameters::mainnet(),
            Network::Testnet => NetworkParameters::testnet(),
            Network::Regtest => NetworkParameters::regtest(),
            Network::Unittest => NetworkParameters::unittest(),
        }
    }

    /// Returns the mainnet parameters.
    pub fn mainnet() -> NetworkParameters {
        NetworkParameters {
            network: Network::Mainnet,
            target_timespan: mainnet::TARGET_TIMESPAN,
            target_spacing: mainnet::TARGET_SPACING,
            pow_limit: ExpandedDifficulty::max_shifted_right(mainnet::POW_LIMIT_SHIFT),
            last_pow_block_height: mainnet::LAST_POW_BLOCK_HEIGHT,
            lwma_activation_height: mainnet::LWMA_ACTIVATION_HEIGHT,
            premine_end_height: PREMINE_END_HEIGHT,
            pow_no_retargeting: false,
            skip_pow_check: false,
            genesis_difficulty_threshold: mainnet::GENESIS_DIFFICULTY_THRESHOLD,
        }
    }

    /// Returns the testnet parameters.
    pub fn testnet() -> NetworkParameters {
        NetworkParameters {
            network: Network::Testnet,
            target_timespan: testnet::TARGET_TIMESPAN,
            target_spacing: testnet::TARGET_SPACING,
            last_pow_block_height: testnet::LAST_POW_BLOCK_HEIGHT,
            lwma_activation_height: testnet::LWMA_ACTIVATION_HEIGHT,
            ..NetworkParameters::mainnet()
        }
    }

    /// Returns the regtest parameters.
    pub fn regtest() -> NetworkParameters {
        NetworkParameters {
            network: Network::Regtest,
            pow_limit: ExpandedDifficulty::max_shifted_right(regtest::POW_LIMIT_SHIFT),
            genesis_difficulty_threshold: regtest::GENESIS_DIFFICULTY_THRESHOLD,
            ..NetworkParameters::testnet()
        }
    }

    /// Returns the unit test network parameters.
    pub fn unittest() -> NetworkParameters {
        NetworkParameters {
            network: Network::Unittest,
            ..NetworkParameters::mainnet()
        }
    }

    /// Returns a builder that starts from the default parameters for `network`.
    pub fn build(network: Network) -> ParametersBuilder {
        ParametersBuilder::new(network)
    }

    /// The network these parameters were built for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// The legacy retarget timespan, in seconds.
    pub fn target_timespan(&self) -> i64 {
        self.target_timespan
    }

    /// The legacy target block spacing, in seconds.
    pub fn target_spacing(&self) -> i64 {
        self.target_spacing
    }

    /// The number of blocks between legacy difficulty adjustments.
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.target_timespan / self.target_spacing
    }

    /// The easiest difficulty threshold allowed, `PoWLimit`.
    pub fn pow_limit(&self) -> ExpandedDifficulty {
        self.pow_limit
    }

    /// The fixed difficulty threshold used during the premine period.
    pub fn premine_difficulty_limit(&self) -> ExpandedDifficulty {
        ExpandedDifficulty::max_shifted_right(PREMINE_DIFFICULTY_SHIFT)
    }

    /// The last block mined with proof-of-work rewards.
    pub fn last_pow_block_height(&self) -> Height {
        self.last_pow_block_height
    }

    /// The first height that uses the LWMA difficulty adjustment.
    pub fn lwma_activation_height(&self) -> Height {
        self.lwma_activation_height
    }

    /// The last height of the premine period.
    pub fn premine_end_height(&self) -> Height {
        self.premine_end_height
    }

    /// Returns true if every block keeps its parent's difficulty threshold.
    pub fn pow_no_retargeting(&self) -> bool {
        self.pow_no_retargeting
    }

    /// Returns true if proof-of-work validation accepts any hash.
    ///
    /// Always false on public networks.
    pub fn skip_pow_check(&self) -> bool {
        self.skip_pow_check
    }

    /// The genesis block difficulty threshold.
    pub fn genesis_difficulty_threshold(&self) -> CompactDifficulty {
        self.genesis_difficulty_threshold
    }
}

/// Builder for configured [`NetworkParameters`].
///
/// Used by tests and local networks to change difficulty thresholds, without
/// mutating any shared parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParametersBuilder {
    parameters: NetworkParameters,
}

impl ParametersBuilder {
    /// Returns a builder that starts from the default parameters for `network`.
    pub fn new(network: Network) -> ParametersBuilder {
        ParametersBuilder {
            parameters: network.parameters(),
        }
    }

    /// Sets the legacy retarget timespan, in seconds.
    pub fn target_timespan(mut self, target_timespan: i64) -> Self {
        self.parameters.target_timespan = target_timespan;
        self
    }

    /// Sets the legacy target block spacing, in seconds.
    pub fn target_spacing(mut self, target_spacing: i64) -> Self {
        self.parameters.target_spacing = target_spacing;
        self
    }

    /// Sets the proof-of-work limit.
    pub fn pow_limit(mut self, pow_limit: ExpandedDifficulty) -> Self {
        self.parameters.pow_limit = pow_limit;
        self
    }

    /// Sets the last proof-of-work block height.
    pub fn last_pow_block_height(mut self, height: Height) -> Self {
        self.parameters.last_pow_block_height = height;
        self
    }

    /// Sets the LWMA activation height.
    pub fn lwma_activation_height(mut self, height: Height) -> Self {
        self.parameters.lwma_activation_height = height;
        self
    }

    /// Sets the last height of the premine period.
    pub fn premine_end_height(mut self, height: Height) -> Self {
        self.parameters.premine_end_height = height;
        self
    }

    /// Sets whether blocks keep their parent's difficulty threshold.
    pub fn pow_no_retargeting(mut self, pow_no_retargeting: bool) -> Self {
        self.parameters.pow_no_retargeting = pow_no_retargeting;
        self
    }

    /// Sets whether proof-of-work validation accepts any hash.
    pub fn skip_pow_check(mut self, skip_pow_check: bool) -> Self {
        self.parameters.skip_pow_check = skip_pow_check;
        self
    }

    /// Checks the configured values, and returns the parameters.
    pub fn finish(self) -> Result<NetworkParameters, ParametersError> {
        let parameters = self.parameters;

        if parameters.skip_pow_check && parameters.network.is_public() {
            return Err(ParametersError::SkipPowCheckOnPublicNetwork(
                parameters.network,
            ));
        }

        if parameters.target_spacing <= 0 {
            return Err(ParametersError::ZeroTargetSpacing(parameters.target_spacing));
        }

        if parameters.target_timespan < parameters.target_spacing {
            return Err(ParametersError::InvalidAdjustmentInterval {
                target_timespan: parameters.target_timespan,
                target_spacing: parameters.target_spacing,
            });
        }

        if parameters.pow_limit.is_zero() {
            return Err(ParametersError::InvalidPowLimit);
        }

        Ok(parameters)
    }
}
