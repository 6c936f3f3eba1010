//! The network selected by this process.

use once_cell::sync::OnceCell;

use super::{Network, NetworkParameters, ParametersError};

/// The parameters chosen at startup. Set at most once.
static SELECTED: OnceCell<NetworkParameters> = OnceCell::new();

/// Selects the default parameters for `network`, for the rest of this process.
///
/// Selecting the same network again returns the existing selection.
/// Selecting a different network fails.
pub fn select_network(network: Network) -> Result<&'static NetworkParameters, ParametersError> {
    select_parameters(network.parameters())
}

/// Selects configured `parameters`, for the rest of this process.
///
/// Selecting identical parameters again returns the existing selection.
/// Selecting different parameters fails.
pub fn select_parameters(
    parameters: NetworkParameters,
) -> Result<&'static NetworkParameters, ParametersError> {
    let requested = parameters.network();

    let mut newly_selected = false;
    let selected = SELECTED.get_or_init(|| {
        newly_selected = true;
        parameters.clone()
    });

    if newly_selected {
        tracing::info!(network = %requested, "selected network parameters");
    }

    if *selected != parameters {
        return Err(ParametersError::NetworkAlreadySelected {
            selected: selected.network(),
            requested,
        });
    }

    Ok(selected)
}

/// Returns the parameters selected by this process, if any.
pub fn selected() -> Option<&'static NetworkParameters> {
    SELECTED.get()
}
