//! Normalized outward event vocabulary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed failure taxonomy reported to the mediation host
///
/// Underlying-SDK failures are mapped into exactly one of these; SDK-specific
/// error types never cross the adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The SDK had no ad to deliver
    NoFill,
    /// The SDK ad request timed out
    Timeout,
    /// The placement id could not be parsed; detected locally
    InvalidConfiguration,
    /// `show` was called without a ready ad
    AdNotReady,
    /// A loaded ad failed to display
    InternalError,
    /// Any other load-time failure
    Unspecified,
}

impl ErrorKind {
    /// Stable identifier, suitable for logs and metrics labels
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoFill => "no_fill",
            ErrorKind::Timeout => "timeout",
            ErrorKind::InvalidConfiguration => "invalid_configuration",
            ErrorKind::AdNotReady => "ad_not_ready",
            ErrorKind::InternalError => "internal_error",
            ErrorKind::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reward granted at the end of a rewarded ad
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Currency or unit identifier
    pub label: String,
    pub amount: i32,
}

impl Reward {
    /// Build a reward from the SDK's fractional amount
    ///
    /// The amount is truncated toward zero (`5.9` becomes `5`), saturating at
    /// the `i32` bounds; `NaN` becomes `0`. The loss of precision is accepted.
    pub fn from_sdk_amount(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount: amount as i32,
        }
    }
}

/// Event delivered to the host through a format-specific listener
///
/// Produced only by the adapter's event translator and controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NormalizedEvent {
    Loaded,
    LoadFailed { error: ErrorKind },
    Displayed,
    DisplayFailed { error: ErrorKind },
    Clicked,
    Hidden,
    Expanded,
    Collapsed,
    VideoStarted,
    VideoCompleted,
    UserRewarded { reward: Reward },
}
