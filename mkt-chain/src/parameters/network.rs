//! Network identifiers.

use std::{fmt, str::FromStr};

use thiserror::Error;

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

pub mod parameters;

/// An enum describing the possible network choices.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub enum Network {
    /// The production mainnet.
    #[default]
    Mainnet,

    /// The public test network.
    Testnet,

    /// A local regression test network, with trivial mining.
    Regtest,

    /// The network used by unit tests.
    Unittest,
}

impl From<Network> for &'static str {
    fn from(network: Network) -> &'static str {
        match network {
            Network::Mainnet => "Mainnet",
            Network::Testnet => "Testnet",
            Network::Regtest => "Regtest",
            Network::Unittest => "Unittest",
        }
    }
}

impl From<&Network> for &'static str {
    fn from(network: &Network) -> &'static str {
        (*network).into()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into())
    }
}

impl Network {
    /// Returns an iterator over [`Network`] variants.
    pub fn iter() -> impl Iterator<Item = Self> {
        [Self::Mainnet, Self::Testnet, Self::Regtest, Self::Unittest].into_iter()
    }

    /// Returns `true` if this network is shared with other nodes.
    ///
    /// Public networks must always check proof-of-work.
    pub fn is_public(&self) -> bool {
        matches!(self, Network::Mainnet | Network::Testnet)
    }

    /// Returns the default consensus parameters for this network.
    pub fn parameters(self) -> parameters::NetworkParameters {
        parameters::NetworkParameters::new(self)
    }
}

impl FromStr for Network {
    type Err = InvalidNetworkError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            "unittest" => Ok(Network::Unittest),
            _ => Err(InvalidNetworkError(string.to_owned())),
        }
    }
}

/// An error parsing a network name.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("Invalid network: {0}")]
pub struct InvalidNetworkError(String);
