//! Consensus parameters for each MktCoin network.
//!
//! Each network has one immutable [`NetworkParameters`] value, built by a
//! pure function of the [`Network`]. Nodes pick their network once at
//! startup with [`select_network`].
//!
//! The consensus functions in this workspace never read the selected
//! network: they take `&NetworkParameters` arguments. So tests can build a
//! distinct set of parameters for each case, using [`ParametersBuilder`].

pub mod constants;
mod network;
mod selection;


pub use network::{
    parameters::{NetworkParameters, ParametersBuilder, ParametersError},
    InvalidNetworkError, Network,
};
pub use selection::{select_network, select_parameters, selected};
