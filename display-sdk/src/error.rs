use thiserror::Error;

/// Version-neutral failure reported by the underlying SDK
///
/// Both bindings map their own exception types onto this enum. The adapter
/// translates it further into the outward [`ErrorKind`](mediation_types::ErrorKind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    /// The ad server had nothing to deliver
    #[error("no ad to deliver: {0}")]
    NoAd(String),

    /// The ad request did not complete in time
    #[error("ad request timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The bound SDK version does not provide this capability
    #[error("{0} is not supported by this SDK version")]
    Unsupported(&'static str),

    #[error("{0}")]
    Other(String),
}

/// Result type for underlying SDK calls
pub type Result<T> = std::result::Result<T, SdkError>;
