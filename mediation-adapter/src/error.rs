use display_sdk::SdkError;
use mediation_types::{ErrorKind, PlacementError};
use thiserror::Error;
use ui_dispatch::DispatchError;

use crate::translator;

/// Errors raised inside the adapter
///
/// None of these cross the host boundary: the facade reports each one to the
/// outward listener as an [`ErrorKind`].
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The third-party placement id could not be parsed
    #[error("Invalid placement id {raw:?}: {source}")]
    InvalidPlacement {
        raw: Option<String>,
        #[source]
        source: PlacementError,
    },

    /// The underlying SDK rejected a call
    #[error("Display SDK error: {0}")]
    Sdk(#[from] SdkError),

    /// The UI context is no longer accepting work
    #[error("UI dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Failed to read adapter configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse adapter configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl AdapterError {
    /// Outward error kind reported for a failed load
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdapterError::InvalidPlacement { .. }
            | AdapterError::ConfigIo(_)
            | AdapterError::ConfigParse(_) => ErrorKind::InvalidConfiguration,
            AdapterError::Sdk(error) => translator::load_error_kind(error),
            AdapterError::Dispatch(_) => ErrorKind::Unspecified,
        }
    }
}

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;
