use thiserror::Error;

/// Reasons a raw placement string is rejected
///
/// A rejected placement never reaches the underlying SDK. The adapter reports
/// it to the host as [`ErrorKind::InvalidConfiguration`](crate::ErrorKind).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// No placement string was supplied, or it was empty
    #[error("placement id is missing or empty")]
    Empty,

    /// Fewer than the three mandatory `/`-delimited segments
    #[error("placement id has {found} segment(s), expected at least 3")]
    MissingSegments { found: usize },

    /// One of the mandatory segments is not an integer
    #[error("placement {field} `{value}` is not an integer")]
    InvalidSegment { field: &'static str, value: String },
}

/// Result type for placement parsing
pub type Result<T> = std::result::Result<T, PlacementError>;
