use thiserror::Error;

/// Errors raised by the dispatch context
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The context was shut down, or its queue owner is gone
    #[error("UI context has been closed")]
    Closed,

    /// The dedicated UI thread could not be started
    #[error("Failed to spawn UI thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The background runtime could not be built
    #[error("Failed to build background runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Result type for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;
