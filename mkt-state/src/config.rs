use serde::{Deserialize, Serialize};

use mkt_chain::parameters::{self, Network, NetworkParameters, ParametersError};

/// Configuration for the chain state.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// The network whose consensus parameters are used.
    ///
    /// Set to `Mainnet` by default.
    pub network: Network,
}

impl Config {
    /// Returns the default consensus parameters for the configured network.
    pub fn network_parameters(&self) -> NetworkParameters {
        self.network.parameters()
    }

    /// Selects the configured network for the rest of this process.
    ///
    /// See [`parameters::select_network`] for details.
    pub fn select_network(&self) -> Result<&'static NetworkParameters, ParametersError> {
        parameters::select_network(self.network)
    }
}
